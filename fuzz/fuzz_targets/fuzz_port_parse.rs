#![no_main]

use inet_connect::Port;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(port) = s.parse::<Port>() {
            // Display must round-trip through the parser
            let again: Port = port.to_string().parse().expect("reparse");
            assert_eq!(port, again);
        }
    }
});
