#![no_main]

use libfuzzer_sys::fuzz_target;
use shareseed_shamir::combine_mnemonic;

fuzz_target!(|data: &[u8]| {
    // One share per line; combine must return Ok or Err, never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let lines: Vec<&str> = s.lines().collect();
        let _ = combine_mnemonic(&lines);
    }
});
