#![no_main]
use libfuzzer_sys::fuzz_target;
extern crate restify;

fuzz_target!(|data: &[u8]| {
    let _ = restify::load_buffer(data);
});
