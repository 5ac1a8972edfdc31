//! Share files
//!
//! One plain-text file per share: comment lines telling whoever finds it
//! what it is and how many other parts are needed, then `part=` and
//! `secret=` lines. Only the `secret=` line is read back.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{OutputOptions, SplitParams};

const SECRET_KEY: &str = "secret=";

const TOOL_GUIDANCE: &str = "\
# The tool used to create the shared secrets and to recombine them can be found at https://github.com/cloudbusting/shareseed
# A BIP39 seed is used to derive public/private key pairs, in this case to secure cryptocurrency (e.g. Bitcoin)
# If you have sufficient shares to recombine and recover the secret, you should initialise a hardware wallet, using the seed to recover the addresses and stored funds";

#[derive(Error, Debug)]
pub enum FileShareError {
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("no matching file parts for pattern {0:?}")]
    NoMatchingFiles(String),
    #[error("secret not found in file {}", .0.display())]
    SecretNotFound(PathBuf),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileShareError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| FileShareError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// File name for one part, e.g. `BTC-2-of-5.share.txt`
pub fn share_file_name(prefix: &str, part: usize, parts: u8) -> String {
    format!("{}-{}-of-{}.share.txt", prefix, part, parts)
}

fn parts_guidance(parts: u8) -> String {
    format!(
        "# This file contains a shared secret, one of {} parts comprising a BIP39 seed.",
        parts
    )
}

fn device_guidance(device: &str) -> String {
    if device.is_empty() {
        "# Information to identify the applicable wallet was not provided.".to_string()
    } else {
        format!("# The seed was used with the wallet '{}'", device)
    }
}

fn threshold_guidance(threshold: u8) -> String {
    let noun = if threshold <= 2 { "part" } else { "parts" };
    format!(
        "# To recover the secret, at least {} other {} of the share set ({} in total) must be combined.",
        threshold.saturating_sub(1),
        noun,
        threshold
    )
}

/// Write the full content of one share file
pub fn write_share<W: Write>(
    out: &mut W,
    params: SplitParams,
    device: &str,
    part: usize,
    share: &str,
) -> io::Result<()> {
    writeln!(out, "{}", parts_guidance(params.parts))?;
    writeln!(out, "{}", device_guidance(device))?;
    writeln!(out, "{}", threshold_guidance(params.threshold))?;
    writeln!(out, "{}", TOOL_GUIDANCE)?;
    writeln!(out, "part={}", part)?;
    writeln!(out, "{}{}", SECRET_KEY, share)?;
    Ok(())
}

/// Write one file per share into `options.output_dir`.
///
/// Files are numbered from 1 in the order given. Returns the paths written.
pub fn write_share_files(
    params: SplitParams,
    options: &OutputOptions,
    shares: &[String],
) -> Result<Vec<PathBuf>, FileShareError> {
    let mut written = Vec::with_capacity(shares.len());
    for (i, share) in shares.iter().enumerate() {
        let part = i + 1;
        let path = options
            .output_dir
            .join(share_file_name(&options.prefix, part, params.parts));

        let mut file = File::create(&path).map_err(FileShareError::io(&path))?;
        write_share(&mut file, params, &options.device, part, share)
            .and_then(|_| file.sync_all())
            .map_err(FileShareError::io(&path))?;

        log::info!("wrote part {} to {}", part, path.display());
        written.push(path);
    }
    Ok(written)
}

/// Find the `secret=` line in a share file.
///
/// Returns the value with surrounding whitespace trimmed and inner runs of
/// whitespace collapsed to one space, or `None` if no such line exists.
pub fn secret_from_reader<R: BufRead>(reader: R) -> io::Result<Option<String>> {
    for line in reader.lines() {
        let line = line?;
        if let Some(value) = line.trim().strip_prefix(SECRET_KEY) {
            return Ok(Some(value.split_whitespace().collect::<Vec<_>>().join(" ")));
        }
    }
    Ok(None)
}

/// Read the secret out of one share file
pub fn secret_from_file(path: &Path) -> Result<String, FileShareError> {
    let file = File::open(path).map_err(FileShareError::io(path))?;
    secret_from_reader(BufReader::new(file))
        .map_err(FileShareError::io(path))?
        .ok_or_else(|| FileShareError::SecretNotFound(path.to_path_buf()))
}

/// Read the secrets of every file matching a glob pattern, in path order
pub fn secrets_from_pattern(pattern: &str) -> Result<Vec<String>, FileShareError> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(FileShareError::Io {
                    path,
                    source: e.into(),
                });
            }
        }
    }

    if paths.is_empty() {
        return Err(FileShareError::NoMatchingFiles(pattern.to_string()));
    }
    paths.sort();

    log::info!("found {} share files matching {:?}", paths.len(), pattern);
    paths.iter().map(|p| secret_from_file(p)).collect()
}
