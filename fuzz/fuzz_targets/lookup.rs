#![no_main]
use libfuzzer_sys::fuzz_target;
extern crate restify;

const HTML: &str = r#"
<!DOCTYPE html>
<div id="main" class="a b">
    <p id="greeting" data-x="">Hello World</p>
    <img id="img" src="image.png" />
</div>
"#;

fuzz_target!(|data: &str| {
    let doc = restify::load_buffer(HTML.as_bytes()).unwrap();

    let _ = doc.find_by_id(data);
    let _ = doc.find_all_by_class(data);
    let _ = doc.find_all_by_attribute_name(data);
    let _ = doc.find_all_by_attribute_name_value("data-x", data);
    let _ = doc.find_all_by_tag_name(data);
});
