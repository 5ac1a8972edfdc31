//! Presentable shares
//!
//! A share is written down as its index in two lowercase hex digits, a
//! space, and the BIP-39 mnemonic of its payload:
//!
//! ```text
//! 7c legal winner thank year wave sausage worth useful legal winner thank yellow
//! ```
//!
//! The payload must be a valid BIP-39 entropy length (16..=32 bytes in steps
//! of 4), which is why only seed-sized secrets can be split into
//! presentable shares.

use crate::mnemonic::{entropy_to_mnemonic, mnemonic_to_entropy};
use crate::shamir::Share;
use crate::ShamirError;

/// Export a share as `"<hex index> <mnemonic>"`
pub fn format_share(share: &Share) -> Result<String, ShamirError> {
    let words = entropy_to_mnemonic(&share.data)?;
    Ok(format!("{:02x} {}", share.index, words))
}

/// Parse a share written by [`format_share`].
///
/// Leading and trailing whitespace is ignored, and the mnemonic may be
/// split across any whitespace (lines, tabs, repeated spaces).
pub fn parse_share(input: &str) -> Result<Share, ShamirError> {
    let trimmed = input.trim();

    let hex_index = trimmed.get(..2).ok_or(ShamirError::MalformedShareText)?;
    let index = parse_index(hex_index)?;

    let rest = &trimmed[2..];
    if !rest.starts_with(char::is_whitespace) {
        return Err(ShamirError::MalformedShareText);
    }

    let data = mnemonic_to_entropy(rest)?;
    Ok(Share { index, data })
}

fn parse_index(hex_index: &str) -> Result<u8, ShamirError> {
    let invalid = || ShamirError::InvalidIndexHex(hex_index.to_string());
    let bytes = hex::decode(hex_index).map_err(|_| invalid())?;
    match bytes.as_slice() {
        [0] => Err(invalid()),
        [index] => Ok(*index),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MnemonicError;

    const LEGAL: &str = "legal winner thank year wave sausage worth useful legal winner thank yellow";

    #[test]
    fn test_format_share() {
        let share = Share {
            index: 0x0a,
            data: vec![0x7f; 16],
        };
        assert_eq!(format_share(&share).unwrap(), format!("0a {}", LEGAL));

        let share = Share {
            index: 0xff,
            data: vec![0u8; 16],
        };
        assert!(format_share(&share).unwrap().starts_with("ff abandon "));
    }

    #[test]
    fn test_format_rejects_non_bip39_payload() {
        let share = Share {
            index: 1,
            data: vec![0u8; 17],
        };
        assert_eq!(
            format_share(&share),
            Err(ShamirError::Mnemonic(MnemonicError::InvalidEntropyLength(17)))
        );
    }

    #[test]
    fn test_parse_share() {
        let share = parse_share(&format!("7c {}", LEGAL)).unwrap();
        assert_eq!(share.index, 0x7c);
        assert_eq!(share.data, vec![0x7f; 16]);

        // Upper-case hex, padding, and a phrase broken across lines
        let messy = "  7C   legal winner thank year\n wave sausage worth useful\n legal winner thank yellow \n";
        assert_eq!(parse_share(messy).unwrap(), share);
    }

    #[test]
    fn test_parse_format_roundtrip() {
        let share = Share {
            index: 0x42,
            data: (0u8..32).collect(),
        };
        let text = format_share(&share).unwrap();
        assert_eq!(parse_share(&text).unwrap(), share);
    }

    #[test]
    fn test_parse_invalid_index() {
        for bad in ["zz", "0g", "00", "-1"] {
            assert_eq!(
                parse_share(&format!("{} {}", bad, LEGAL)),
                Err(ShamirError::InvalidIndexHex(bad.to_string())),
                "index {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse_share(""), Err(ShamirError::MalformedShareText));
        assert_eq!(parse_share("a"), Err(ShamirError::MalformedShareText));
        // Index must be followed by whitespace
        assert_eq!(
            parse_share(&format!("7c{}", LEGAL)),
            Err(ShamirError::MalformedShareText)
        );
        // Index with nothing after it
        assert_eq!(parse_share("7c"), Err(ShamirError::MalformedShareText));
        // Multi-byte character straddling the index boundary
        assert_eq!(parse_share("€ legal"), Err(ShamirError::MalformedShareText));
    }

    #[test]
    fn test_parse_propagates_mnemonic_errors() {
        assert_eq!(
            parse_share("7c legal winner thank"),
            Err(ShamirError::Mnemonic(MnemonicError::InvalidWordCount(3)))
        );
        let bad_word = LEGAL.replace("wave", "waves");
        assert_eq!(
            parse_share(&format!("7c {}", bad_word)),
            Err(ShamirError::Mnemonic(MnemonicError::UnknownWord(
                "waves".into()
            )))
        );
        let bad_checksum = LEGAL.replace("yellow", "wrong");
        assert_eq!(
            parse_share(&format!("7c {}", bad_checksum)),
            Err(ShamirError::Mnemonic(MnemonicError::ChecksumMismatch))
        );
    }
}
