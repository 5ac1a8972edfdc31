//! Seed phrase sharing
//!
//! The full pipeline: mnemonic → entropy → shares → presentable strings,
//! and back.

use zeroize::Zeroizing;

use crate::mnemonic::{entropy_to_mnemonic, mnemonic_to_entropy};
use crate::shamir::{reconstruct_secret, split_secret};
use crate::shares::{format_share, parse_share};
use crate::ShamirError;

/// Split a BIP-39 mnemonic into `parts` presentable shares, any `threshold`
/// of which recover it.
///
/// The mnemonic is fully validated (words, count, checksum) first. Shares
/// are returned in part order; their hex indices are random.
pub fn split_mnemonic(
    mnemonic: &str,
    parts: u8,
    threshold: u8,
) -> Result<Vec<String>, ShamirError> {
    let entropy = Zeroizing::new(mnemonic_to_entropy(mnemonic)?);
    let shares = split_secret(&entropy, parts, threshold)?;
    shares.iter().map(format_share).collect()
}

/// Recover a mnemonic from presentable shares.
///
/// Every share is parsed (and its own checksum verified) before combining.
/// Too few shares are not an error: the result is then a valid-looking but
/// unrelated mnemonic.
pub fn combine_mnemonic<S: AsRef<str>>(shares: &[S]) -> Result<String, ShamirError> {
    let parsed = shares
        .iter()
        .map(|s| parse_share(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let entropy = Zeroizing::new(reconstruct_secret(&parsed)?);
    Ok(entropy_to_mnemonic(&entropy)?)
}
