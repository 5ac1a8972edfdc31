//! Run configuration, validated from command-line flags.
//!
//! Everything the commands need is carried in these structs; nothing is
//! read from globals once `main` has parsed the arguments.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("parts must be between 2 and 255")]
    InvalidPartsSize,
    #[error("threshold must be between 1 and 255")]
    InvalidThresholdSize,
    #[error("threshold cannot be greater than parts")]
    ThresholdGreaterThanParts,
    #[error("no output would be generated. quiet and fileparts must be set appropriately")]
    NoOutputRequested,
    #[error("no shares were provided. use --secret and/or --filepattern")]
    NoSharesProvided,
}

/// Validated share counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitParams {
    /// Total shares to produce
    pub parts: u8,
    /// Shares needed to recover
    pub threshold: u8,
}

/// Where the shares of a split go
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Print each share on standard output
    pub print: bool,
    /// Write one share file per part
    pub files: bool,
    /// Label prefixed to each part number and file name, e.g. "BTC"
    pub prefix: String,
    /// Wallet or device the seed belongs to, recorded in share files
    pub device: String,
    /// Directory share files are written to
    pub output_dir: PathBuf,
}

/// Check the share/threshold counts and output flags of a split.
///
/// A threshold of 1 passes here; the splitter itself rejects it since a
/// single share would have to be the secret.
pub fn validate_params(
    parts: u32,
    threshold: u32,
    quiet: bool,
    fileparts: bool,
) -> Result<SplitParams, ParamsError> {
    if !(2..=255).contains(&parts) {
        return Err(ParamsError::InvalidPartsSize);
    }
    if !(1..=255).contains(&threshold) {
        return Err(ParamsError::InvalidThresholdSize);
    }
    if threshold > parts {
        return Err(ParamsError::ThresholdGreaterThanParts);
    }
    if quiet && !fileparts {
        return Err(ParamsError::NoOutputRequested);
    }
    Ok(SplitParams {
        parts: parts as u8,
        threshold: threshold as u8,
    })
}
