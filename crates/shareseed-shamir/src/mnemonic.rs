//! BIP-39 mnemonic codec
//!
//! Converts between raw entropy and mnemonic phrases over the English
//! wordlist. The phrase carries a checksum: the first `ENT / 32` bits of
//! SHA-256(entropy), appended to the entropy bits before they are cut into
//! 11-bit words.
//!
//! | entropy | checksum | words |
//! |---------|----------|-------|
//! | 16 B    | 4 bits   | 12    |
//! | 20 B    | 5 bits   | 15    |
//! | 24 B    | 6 bits   | 18    |
//! | 28 B    | 7 bits   | 21    |
//! | 32 B    | 8 bits   | 24    |

use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::wordlist::{index_to_word, word_to_index, BITS_PER_WORD};

/// Entropy lengths (in bytes) that BIP-39 can encode
pub const ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Word counts that BIP-39 phrases can have
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid entropy length: {0} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidEntropyLength(usize),
    #[error("Invalid word count: {0} (expected 12, 15, 18, 21 or 24)")]
    InvalidWordCount(usize),
    #[error("Unknown word: {0:?}")]
    UnknownWord(String),
    #[error("Mnemonic checksum mismatch")]
    ChecksumMismatch,
}

/// Whether `len` bytes of entropy can be expressed as a mnemonic
pub fn is_valid_entropy_len(len: usize) -> bool {
    ENTROPY_LENGTHS.contains(&len)
}

/// Number of words in the mnemonic for `entropy_len` bytes of entropy
pub fn word_count_for(entropy_len: usize) -> Result<usize, MnemonicError> {
    if !is_valid_entropy_len(entropy_len) {
        return Err(MnemonicError::InvalidEntropyLength(entropy_len));
    }
    // (ENT + ENT/32) / 11 = ENT * 3 / 32, with ENT = 8 * bytes
    Ok(entropy_len * 3 / 4)
}

/// Checksum byte for `entropy`, keeping only the leading `bits` (4..=8) bits
fn checksum(entropy: &[u8], bits: usize) -> u8 {
    let hash = Sha256::digest(entropy);
    hash[0] & (0xFFu8 << (8 - bits))
}

/// Read bit `i` (big-endian bit order) of `bytes`
#[inline]
fn bit_at(bytes: &[u8], i: usize) -> bool {
    bytes[i / 8] & (0x80 >> (i % 8)) != 0
}

/// Encode entropy as a space-separated mnemonic phrase.
///
/// # Example
/// ```
/// use shareseed_shamir::mnemonic::entropy_to_mnemonic;
///
/// let phrase = entropy_to_mnemonic(&[0u8; 16]).unwrap();
/// assert!(phrase.ends_with("abandon about"));
/// ```
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String, MnemonicError> {
    let word_count = word_count_for(entropy.len())?;
    let checksum_bits = entropy.len() / 4;

    // Entropy followed by one byte holding the checksum bits
    let mut bits = Zeroizing::new(Vec::with_capacity(entropy.len() + 1));
    bits.extend_from_slice(entropy);
    bits.push(checksum(entropy, checksum_bits));

    let words: Vec<&str> = (0..word_count)
        .map(|w| {
            let index = (0..BITS_PER_WORD).fold(0u16, |acc, b| {
                (acc << 1) | bit_at(&bits, w * BITS_PER_WORD + b) as u16
            });
            index_to_word(index)
        })
        .collect();

    Ok(words.join(" "))
}

/// Decode a mnemonic phrase back into its entropy.
///
/// Words may be separated (and surrounded) by any run of whitespace,
/// including newlines. Lookup is case-insensitive.
pub fn mnemonic_to_entropy(mnemonic: &str) -> Result<Vec<u8>, MnemonicError> {
    let words: Vec<&str> = mnemonic.split_whitespace().collect();
    if !WORD_COUNTS.contains(&words.len()) {
        return Err(MnemonicError::InvalidWordCount(words.len()));
    }

    let total_bits = words.len() * BITS_PER_WORD;
    let checksum_bits = total_bits / 33;
    let entropy_bits = total_bits - checksum_bits;

    // Entropy bytes plus one trailing byte that receives the checksum bits
    let mut bits = Zeroizing::new(vec![0u8; entropy_bits / 8 + 1]);
    for (w, word) in words.iter().enumerate() {
        let index = word_to_index(&word.to_lowercase())
            .ok_or_else(|| MnemonicError::UnknownWord((*word).to_string()))?;
        for b in 0..BITS_PER_WORD {
            if index & (1 << (BITS_PER_WORD - 1 - b)) != 0 {
                let pos = w * BITS_PER_WORD + b;
                bits[pos / 8] |= 0x80 >> (pos % 8);
            }
        }
    }

    let entropy = bits[..entropy_bits / 8].to_vec();
    if checksum(&entropy, checksum_bits) != bits[entropy_bits / 8] {
        return Err(MnemonicError::ChecksumMismatch);
    }

    Ok(entropy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_entropy() {
        let phrase = entropy_to_mnemonic(&[0u8; 16]).unwrap();
        assert_eq!(
            phrase,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
        assert_eq!(mnemonic_to_entropy(&phrase).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn test_word_counts() {
        for (len, words) in ENTROPY_LENGTHS.iter().zip(WORD_COUNTS) {
            let phrase = entropy_to_mnemonic(&vec![0xA5; *len]).unwrap();
            assert_eq!(phrase.split(' ').count(), words);
            assert_eq!(word_count_for(*len).unwrap(), words);
        }
    }

    #[test]
    fn test_invalid_entropy_length() {
        for len in [0usize, 1, 15, 17, 33, 64] {
            assert_eq!(
                entropy_to_mnemonic(&vec![0u8; len]),
                Err(MnemonicError::InvalidEntropyLength(len))
            );
        }
    }

    #[test]
    fn test_invalid_word_count() {
        assert_eq!(mnemonic_to_entropy(""), Err(MnemonicError::InvalidWordCount(0)));
        assert_eq!(
            mnemonic_to_entropy("abandon abandon abandon"),
            Err(MnemonicError::InvalidWordCount(3))
        );
        let thirteen = vec!["abandon"; 13].join(" ");
        assert_eq!(
            mnemonic_to_entropy(&thirteen),
            Err(MnemonicError::InvalidWordCount(13))
        );
    }

    #[test]
    fn test_unknown_word() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon bitcoin";
        assert_eq!(word_to_index("bitcoin"), None);
        assert_eq!(
            mnemonic_to_entropy(phrase),
            Err(MnemonicError::UnknownWord("bitcoin".into()))
        );
    }

    #[test]
    fn test_checksum_mismatch() {
        // Last word carries the checksum; "abandon" leaves it all zero
        let phrase = vec!["abandon"; 12].join(" ");
        assert_eq!(
            mnemonic_to_entropy(&phrase),
            Err(MnemonicError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_whitespace_tolerance() {
        let phrase = "\n  abandon abandon\tabandon abandon abandon abandon\n\nabandon abandon   abandon abandon abandon about  \r\n";
        assert_eq!(mnemonic_to_entropy(phrase).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let phrase = "ABANDON Abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon About";
        assert_eq!(mnemonic_to_entropy(phrase).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn test_checksum_bits() {
        // SHA-256 of 16 zero bytes starts with 0x37; keep 4 bits
        assert_eq!(checksum(&[0u8; 16], 4), 0x30);
        assert_eq!(checksum(&[0u8; 16], 8), 0x37);
    }
}
