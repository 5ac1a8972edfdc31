//! `share` and `combine` command bodies.
//!
//! Both write their user-facing output to a caller-supplied writer
//! (standard output in the binary) and leave logging to stderr.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use zeroize::Zeroizing;

use shareseed_shamir::{combine_mnemonic, split_mnemonic};

use crate::config::{OutputOptions, ParamsError, SplitParams};
use crate::files::{secrets_from_pattern, write_share_files};

/// Read a mnemonic from a pipe or redirected file, joining lines with spaces
pub fn read_mnemonic<R: BufRead>(reader: R) -> io::Result<Zeroizing<String>> {
    let mut mnemonic = Zeroizing::new(String::new());
    for line in reader.lines() {
        let line = Zeroizing::new(line?);
        if !mnemonic.is_empty() {
            mnemonic.push(' ');
        }
        mnemonic.push_str(line.trim());
    }
    Ok(mnemonic)
}

/// Split `mnemonic` and emit the shares as requested by `options`
pub fn run_share<W: Write>(
    out: &mut W,
    mnemonic: &str,
    params: SplitParams,
    options: &OutputOptions,
) -> Result<()> {
    let shares = Zeroizing::new(
        split_mnemonic(mnemonic, params.parts, params.threshold)
            .context("Failed to share seed")?,
    );
    log::info!(
        "split seed into {} shares with threshold {}",
        params.parts,
        params.threshold
    );

    writeln!(
        out,
        "Sharing seed in {} parts, requiring {} shares to recover secret\n",
        params.parts, params.threshold
    )?;

    if options.print {
        for (i, share) in shares.iter().enumerate() {
            writeln!(
                out,
                "{}-{}-of-{}: {}",
                options.prefix,
                i + 1,
                params.parts,
                share
            )?;
        }
    }

    if options.files {
        let paths = write_share_files(params, options, &shares)?;
        writeln!(out, "\nFiles for each part have been created:")?;
        for path in paths {
            writeln!(out, "{}", path.display())?;
        }
    } else {
        writeln!(out, "\nRecord and store each share separately")?;
    }

    Ok(())
}

/// Recombine shares given inline and/or found in files, printing the mnemonic
pub fn run_combine<W: Write>(
    out: &mut W,
    secrets: &[String],
    file_pattern: Option<&str>,
) -> Result<()> {
    let mut shares: Zeroizing<Vec<String>> = Zeroizing::new(
        secrets
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    );

    if let Some(pattern) = file_pattern {
        shares.extend(secrets_from_pattern(pattern)?);
    }

    if shares.is_empty() {
        return Err(ParamsError::NoSharesProvided.into());
    }

    log::info!("combining {} shares", shares.len());
    let mnemonic = Zeroizing::new(
        combine_mnemonic(shares.as_slice()).context("Failed to combine shares")?,
    );
    writeln!(out, "{}", mnemonic.as_str())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    const PHRASE: &str =
        "scheme spot photo card baby mountain device kick cradle pact join borrow";

    fn options(print: bool, files: bool, dir: &Path) -> OutputOptions {
        OutputOptions {
            print,
            files,
            prefix: "BTC".to_string(),
            device: "ColdCard 1".to_string(),
            output_dir: dir.to_path_buf(),
        }
    }

    fn params(parts: u8, threshold: u8) -> SplitParams {
        SplitParams { parts, threshold }
    }

    /// Pull the shares back out of `share` output lines
    fn printed_shares(output: &str) -> Vec<String> {
        output
            .lines()
            .filter_map(|line| line.split_once(": ").map(|(_, share)| share.to_string()))
            .collect()
    }

    #[test]
    fn test_read_mnemonic_joins_lines() {
        let input = "scheme spot photo card\n  baby mountain device kick  \ncradle pact join borrow\n";
        let mnemonic = read_mnemonic(Cursor::new(input)).unwrap();
        assert_eq!(mnemonic.as_str(), PHRASE);
    }

    #[test]
    fn test_share_prints_and_combines() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        run_share(&mut out, PHRASE, params(5, 3), &options(true, false, dir.path())).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("Sharing seed in 5 parts, requiring 3 shares to recover secret\n\n"));
        assert!(output.contains("BTC-1-of-5: "));
        assert!(output.contains("BTC-5-of-5: "));
        assert!(output.ends_with("Record and store each share separately\n"));

        let shares = printed_shares(&output);
        assert_eq!(shares.len(), 5);

        let mut recovered = Vec::new();
        run_combine(&mut recovered, &shares[1..4], None).unwrap();
        assert_eq!(String::from_utf8(recovered).unwrap(), format!("{}\n", PHRASE));

        // No files unless asked for
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_quiet_share_writes_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        run_share(&mut out, PHRASE, params(4, 2), &options(false, true, dir.path())).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(printed_shares(&output).is_empty());
        assert!(output.contains("Files for each part have been created:"));
        for part in 1..=4 {
            let path = dir.path().join(format!("BTC-{}-of-4.share.txt", part));
            assert!(path.exists(), "missing {}", path.display());
            assert!(output.contains(&path.display().to_string()));
        }

        let text = std::fs::read_to_string(dir.path().join("BTC-3-of-4.share.txt")).unwrap();
        assert!(text.contains("# The seed was used with the wallet 'ColdCard 1'"));
        assert!(text.contains("\npart=3\n"));
    }

    #[test]
    fn test_combine_from_files_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        run_share(&mut out, PHRASE, params(5, 3), &options(true, true, dir.path())).unwrap();
        let printed = printed_shares(&String::from_utf8(out).unwrap());

        // Two shares from files, one given inline
        std::fs::remove_file(dir.path().join("BTC-1-of-5.share.txt")).unwrap();
        std::fs::remove_file(dir.path().join("BTC-2-of-5.share.txt")).unwrap();
        std::fs::remove_file(dir.path().join("BTC-3-of-5.share.txt")).unwrap();
        let pattern = dir.path().join("BTC-*-of-5.share.txt");

        let mut recovered = Vec::new();
        run_combine(
            &mut recovered,
            &[printed[0].clone()],
            Some(pattern.to_str().unwrap()),
        )
        .unwrap();
        assert_eq!(String::from_utf8(recovered).unwrap().trim(), PHRASE);
    }

    #[test]
    fn test_combine_below_threshold_gives_other_mnemonic() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        run_share(&mut out, PHRASE, params(5, 3), &options(true, false, dir.path())).unwrap();
        let shares = printed_shares(&String::from_utf8(out).unwrap());

        let mut recovered = Vec::new();
        run_combine(&mut recovered, &shares[..2], None).unwrap();
        let recovered = String::from_utf8(recovered).unwrap();
        assert_ne!(recovered.trim(), PHRASE);
        assert_eq!(recovered.split_whitespace().count(), 12);
    }

    #[test]
    fn test_combine_without_shares() {
        let err = run_combine(&mut Vec::<u8>::new(), &["  ".to_string()], None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ParamsError>(),
            Some(&ParamsError::NoSharesProvided)
        );
    }

    #[test]
    fn test_share_rejects_bad_mnemonic() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_share(
            &mut Vec::<u8>::new(),
            "not a seed phrase",
            params(3, 2),
            &options(true, false, dir.path()),
        );
        assert!(result.is_err());
    }
}
