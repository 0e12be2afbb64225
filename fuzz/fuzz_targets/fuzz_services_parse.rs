#![no_main]

use inet_connect::resolve::services::lookup_in;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // First whitespace-separated token doubles as the name to look up
    let name = text.split_whitespace().next().unwrap_or("http");
    let _ = lookup_in(text, name);
});
