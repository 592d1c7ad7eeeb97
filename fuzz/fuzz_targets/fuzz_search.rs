#![no_main]

use libfuzzer_sys::fuzz_target;
use simple_search::{search_source, Options};

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 is not interesting here
    if let Ok(input) = std::str::from_utf8(data) {
        // Looking for panics in parse + walk, not errors
        if let Ok(options) = Options::new(&["def", "return", ":"], 3) {
            let _ = search_source(input, &options);
        }
    }
});
