//! Shareseed Shamir Module
//!
//! Split the entropy behind a BIP-39 seed phrase into N shares, any K of
//! which reconstruct it, and present every share as a two-digit hex index
//! followed by a BIP-39 mnemonic of its payload.
//!
//! # Layers
//!
//! - [`gf256`]: arithmetic in GF(2^8) modulo 0x11B
//! - [`mnemonic`]: entropy ⇄ mnemonic, with the SHA-256 checksum
//! - [`shamir`]: per-byte polynomial split, Lagrange combine at x = 0
//! - [`shares`]: `"<hex index> <mnemonic>"` formatting and parsing
//! - [`seed`]: the full mnemonic → shares → mnemonic round trip
//!
//! # Insufficient shares are not detected
//!
//! Combining fewer shares than the threshold still "succeeds" and returns a
//! value unrelated to the secret. Nothing in the arithmetic can tell the two
//! cases apart. The only integrity check in the system is the BIP-39
//! checksum of the mnemonic that comes out the other end, and callers must
//! treat a surprising result as "not enough shares".
//!
//! # Example
//!
//! ```
//! use shareseed_shamir::seed::{combine_mnemonic, split_mnemonic};
//!
//! let phrase = "legal winner thank year wave sausage worth useful legal winner thank yellow";
//!
//! // Split into 2-of-3 shares
//! let shares = split_mnemonic(phrase, 3, 2).unwrap();
//! assert_eq!(shares.len(), 3);
//!
//! // Recover with any 2 shares
//! let recovered = combine_mnemonic(&shares[1..]).unwrap();
//! assert_eq!(recovered, phrase);
//! ```

pub mod gf256;
pub mod mnemonic;
pub mod seed;
pub mod shamir;
pub mod shares;
pub mod wordlist;

// Re-exports
pub use mnemonic::{entropy_to_mnemonic, mnemonic_to_entropy, MnemonicError};
pub use seed::{combine_mnemonic, split_mnemonic};
pub use shamir::{reconstruct_secret, split_secret, split_secret_with_rng, Share};
pub use shares::{format_share, parse_share};

use thiserror::Error;

/// Largest number of shares (every non-zero element of GF(256))
pub const MAX_SHARES: u8 = u8::MAX;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShamirError {
    #[error("Invalid threshold {0}: need at least 2")]
    InvalidThreshold(u8),
    #[error("Threshold exceeds share count")]
    ThresholdExceedsShares,
    #[error("Invalid share count {0}: need at least 2")]
    InvalidPartsSize(u8),
    #[error("Cannot split an empty secret")]
    EmptySecret,
    #[error("Duplicate share index {0:02x}")]
    DuplicateIndex(u8),
    #[error("Shares have different lengths")]
    MismatchedLength,
    #[error("Not enough shares to reconstruct: need at least 2")]
    InsufficientShares,
    #[error("Invalid share index {0:?}: expected two hex digits between 01 and ff")]
    InvalidIndexHex(String),
    #[error("Malformed share: expected \"<hex index> <mnemonic words>\"")]
    MalformedShareText,
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),
}

/// Share counts for a split, validated on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShamirConfig {
    /// Total shares to generate (N)
    pub parts: u8,
    /// Minimum shares needed to reconstruct (K)
    pub threshold: u8,
}

impl ShamirConfig {
    pub fn new(parts: u8, threshold: u8) -> Result<Self, ShamirError> {
        let config = Self { parts, threshold };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration: 2 <= threshold <= parts <= MAX_SHARES
    pub fn validate(&self) -> Result<(), ShamirError> {
        if self.parts < 2 {
            return Err(ShamirError::InvalidPartsSize(self.parts));
        }
        if self.threshold < 2 {
            return Err(ShamirError::InvalidThreshold(self.threshold));
        }
        if self.threshold > self.parts {
            return Err(ShamirError::ThresholdExceedsShares);
        }
        Ok(())
    }
}
