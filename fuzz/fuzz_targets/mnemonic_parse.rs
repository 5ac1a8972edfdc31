#![no_main]

use libfuzzer_sys::fuzz_target;
use shareseed_shamir::{entropy_to_mnemonic, mnemonic_to_entropy};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that decodes must encode back to the same entropy
        if let Ok(entropy) = mnemonic_to_entropy(s) {
            let phrase = entropy_to_mnemonic(&entropy).unwrap();
            assert_eq!(mnemonic_to_entropy(&phrase).unwrap(), entropy);
        }
    }
});
