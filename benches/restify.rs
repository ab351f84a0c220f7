use criterion::*;

const INPUT: &str = r#"
<!doctype html>
<html>
<head>
    <title>Example Domain</title>

    <meta charset="utf-8" />
    <meta http-equiv="Content-type" content="text/html; charset=utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
</head>

<body>
<div id="content">
    <h1 class="title main">Example Domain</h1>
    <p class="lead">This domain is for use in illustrative examples in documents. You may use this
    domain in literature without prior coordination or asking for permission.</p>
    <p><a class="more" href="https://www.iana.org/domains/example" data-track="">More information...</a></p>
</div>
</body>
</html>
"#;

pub fn load_benchmark(cr: &mut Criterion) {
    cr.bench_function("load_buffer", |b| {
        b.iter(|| {
            let _ = restify::load_buffer(black_box(INPUT.as_bytes()));
        });
    });
}

pub fn lookup_benchmark(cr: &mut Criterion) {
    let doc = restify::load_buffer(INPUT.as_bytes()).unwrap();

    let mut group = cr.benchmark_group("lookup");
    group.bench_function("by_id", |b| b.iter(|| doc.find_by_id(black_box("content"))));
    group.bench_function("by_class", |b| {
        b.iter(|| doc.find_all_by_class(black_box("main")))
    });
    group.bench_function("by_attribute", |b| {
        b.iter(|| doc.find_all_by_attribute_name(black_box("data-track")))
    });
    group.bench_function("by_tag", |b| {
        b.iter(|| doc.find_all_by_tag_name(black_box("meta")))
    });
    group.finish();
}

criterion_group!(benches, load_benchmark, lookup_benchmark);
criterion_main!(benches);
