#![no_main]

use libfuzzer_sys::fuzz_target;
use shareseed_shamir::{format_share, parse_share};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(share) = parse_share(s) {
            assert_ne!(share.index, 0);
            assert_eq!(parse_share(&format_share(&share).unwrap()).unwrap(), share);
        }
    }
});
