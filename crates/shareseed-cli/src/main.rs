//! shareseed: split a BIP39 seed phrase into Shamir shares and recover it
//!
//! # Usage
//!
//! ```bash
//! shareseed share -p 5 -t 3 --prefix BTC < seed.txt
//! shareseed share -p 5 -t 3 --prefix BTC --device "ColdCard 1" -f -q < seed.txt
//! shareseed combine -s "0a legal winner ..." -s "c4 zoo abandon ..." -s "3f ..."
//! shareseed combine -f 'BTC-*.share.txt'
//! ```

mod commands;
mod config;
mod files;
mod memory;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use crate::config::OutputOptions;

const ABOUT: &str =
    "Securely share a BIP39 mnemonic seed in multiple parts, and recombine it from a subset of parts";

const LONG_ABOUT: &str = "\
Protect a BIP39 mnemonic seed with Shamir secret sharing, and recover it from the parts.

Warnings:
  Try the tool with a throwaway seed first, splitting and recombining until you are
  comfortable with how it behaves.

  Run it from a trusted, offline system such as a live boot of Tails. Malware on an
  everyday desktop can capture both the seed you type and the shares printed back.

  Keep the parts apart. A full set of shares stored together is no safer than the
  seed in plain text.";

const SHARE_LONG_ABOUT: &str = "\
Split a BIP39 mnemonic into shares, each a two-digit hex index followed by seed words.

The mnemonic is read from standard input unless given with --mnemonic. Passing it as an
argument can leave it in your shell history; prefer a pipe or redirect.

Shares are printed to standard output and, with --fileparts, also written one per file
along with notes on how many parts are needed for recovery.";

const COMBINE_LONG_ABOUT: &str = "\
Recombine shares into the original BIP39 mnemonic and print it to standard output.

Shares can be given with --secret, read from files matching --filepattern, or both.

At least as many shares as the threshold used when splitting must be supplied. Fewer
shares cannot be detected and produce a different, valid-looking mnemonic. Share files
record the threshold; shares copied elsewhere may not.

Wallets do not all derive addresses from a phrase the same way. If a recovered seed
shows no funds, find out which wallet created it and see https://walletsrecovery.org/";

#[derive(Parser)]
#[command(name = "shareseed")]
#[command(about = ABOUT, long_about = LONG_ABOUT)]
#[command(version)]
struct Cli {
    /// Log filter written to stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "SHARESEED_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a BIP39 mnemonic phrase and produce Shamir secret share phrases
    #[command(long_about = SHARE_LONG_ABOUT)]
    Share {
        /// The BIP39 mnemonic phrase. Omit to read from a pipe or redirect
        #[arg(short, long)]
        mnemonic: Option<String>,

        /// The number of parts to produce
        #[arg(short, long, default_value_t = 5)]
        parts: u32,

        /// The number of parts required to reproduce the mnemonic
        #[arg(short, long, default_value_t = 3)]
        threshold: u32,

        /// Prefix for each part number and file name, e.g. 'BTC'
        #[arg(long, default_value = "")]
        prefix: String,

        /// Identifier for the wallet the seed belongs to, e.g. 'ColdCard 1'
        #[arg(long, default_value = "")]
        device: String,

        /// Write each part to its own file, named for the prefix and part number
        #[arg(short, long)]
        fileparts: bool,

        /// Do not print shares to standard output
        #[arg(short, long)]
        quiet: bool,

        /// Directory for share files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Combine a quorum of shares to reproduce the original BIP39 mnemonic phrase
    #[command(long_about = COMBINE_LONG_ABOUT)]
    Combine {
        /// A share. Quote each one; repeat the flag or separate with commas
        #[arg(short, long, value_delimiter = ',')]
        secret: Vec<String>,

        /// Glob matching share files, e.g. 'BTC*.share.txt'. Quote it so the shell leaves it alone
        #[arg(short, long)]
        filepattern: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init logger
    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .init();

    // Seed material must never reach a core file
    memory::disable_core_dumps();

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Share {
            mnemonic,
            parts,
            threshold,
            prefix,
            device,
            fileparts,
            quiet,
            output_dir,
        } => {
            let params = config::validate_params(parts, threshold, quiet, fileparts)?;

            let mnemonic = match mnemonic {
                Some(m) => Zeroizing::new(m),
                None => {
                    log::debug!("reading mnemonic from stdin");
                    commands::read_mnemonic(io::stdin().lock())
                        .context("Failed to read mnemonic from stdin")?
                }
            };

            let options = OutputOptions {
                print: !quiet,
                files: fileparts,
                prefix,
                device,
                output_dir,
            };

            commands::run_share(&mut stdout, &mnemonic, params, &options)
        }
        Commands::Combine {
            secret,
            filepattern,
        } => {
            let secret = Zeroizing::new(secret);
            commands::run_combine(&mut stdout, &secret, filepattern.as_deref())
        }
    }
}
