//! Core Shamir's Secret Sharing implementation
//!
//! Split a secret into N shares where any K can reconstruct it. Every byte
//! of the secret is the constant term of its own random polynomial of
//! degree K-1; a share holds the evaluations of all of them at one x.

use crate::gf256::{gf_add, gf_mul, lagrange_basis_at_zero, poly_eval};
use crate::{ShamirConfig, ShamirError, MAX_SHARES};
use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// A single share of a secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Share index: the x-coordinate (1..=255, never 0)
    pub index: u8,
    /// Share data (same length as original secret)
    pub data: Vec<u8>,
}

/// Split a secret into shares using Shamir's Secret Sharing
///
/// # Arguments
/// * `secret` - The secret bytes to split
/// * `parts` - Total shares to generate (N)
/// * `threshold` - Minimum shares needed to reconstruct (K)
///
/// # Returns
/// Vector of N shares, any K of which can reconstruct the secret. Share
/// indices are distinct, non-zero, and drawn at random from 1..=255.
pub fn split_secret(secret: &[u8], parts: u8, threshold: u8) -> Result<Vec<Share>, ShamirError> {
    split_secret_with_rng(secret, parts, threshold, &mut rand::thread_rng())
}

/// Same as [`split_secret`], drawing indices and coefficients from `rng`.
pub fn split_secret_with_rng<R: RngCore + CryptoRng>(
    secret: &[u8],
    parts: u8,
    threshold: u8,
    rng: &mut R,
) -> Result<Vec<Share>, ShamirError> {
    let config = ShamirConfig::new(parts, threshold)?;
    if secret.is_empty() {
        return Err(ShamirError::EmptySecret);
    }

    log::debug!(
        "splitting {}-byte secret into {} shares (threshold {})",
        secret.len(),
        config.parts,
        config.threshold
    );

    // Random permutation of the non-zero field elements, first N used as x
    let mut xs: Vec<u8> = (1..=MAX_SHARES).collect();
    xs.shuffle(rng);

    let mut shares: Vec<Share> = xs[..config.parts as usize]
        .iter()
        .map(|&x| Share {
            index: x,
            data: Vec::with_capacity(secret.len()),
        })
        .collect();

    // p(x) = secret + c1*x + c2*x^2 + ... + c_{t-1}*x^{t-1}
    let mut coefficients = Zeroizing::new(vec![0u8; config.threshold as usize]);
    for &secret_byte in secret {
        coefficients[0] = secret_byte;
        rng.fill_bytes(&mut coefficients[1..]);

        for share in &mut shares {
            let y = poly_eval(&coefficients, share.index);
            share.data.push(y);
        }
    }

    Ok(shares)
}

/// Reconstruct a secret from shares
///
/// # Arguments
/// * `shares` - At least threshold shares, in any order
///
/// # Returns
/// The original secret bytes, if at least `threshold` shares were given.
/// With fewer, this still returns `Ok` with bytes unrelated to the secret:
/// the threshold is not recorded anywhere and cannot be checked here.
pub fn reconstruct_secret(shares: &[Share]) -> Result<Vec<u8>, ShamirError> {
    if shares.len() < 2 {
        return Err(ShamirError::InsufficientShares);
    }

    // All shares must have the same length
    let secret_len = shares[0].data.len();
    if shares.iter().any(|s| s.data.len() != secret_len) {
        return Err(ShamirError::MismatchedLength);
    }

    // Check for duplicate indices
    let mut indices: Vec<u8> = shares.iter().map(|s| s.index).collect();
    indices.sort_unstable();
    if let Some(pair) = indices.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(ShamirError::DuplicateIndex(pair[0]));
    }

    log::debug!(
        "reconstructing {}-byte secret from {} shares",
        secret_len,
        shares.len()
    );

    let xs: Vec<u8> = shares.iter().map(|s| s.index).collect();
    let basis = lagrange_basis_at_zero(&xs);

    let secret = (0..secret_len)
        .map(|byte_idx| {
            shares
                .iter()
                .zip(&basis)
                .fold(0u8, |acc, (share, &li)| {
                    gf_add(acc, gf_mul(share.data[byte_idx], li))
                })
        })
        .collect();

    Ok(secret)
}
