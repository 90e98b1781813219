//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line interface to PyWeek.
///
/// Download the published entries of a challenge, or check that an entry
/// archive is packaged the way PyWeek expects.
#[derive(Parser, Debug)]
#[command(name = "pyweek")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// PyWeek service root (overrides PYWEEK_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download all PyWeek entries for a challenge
    Download(DownloadArgs),
    /// Determine if a given zip file is in the proper format
    Verify(VerifyArgs),
}

/// Arguments for `pyweek download`.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// The challenge number to download entries for
    pub challenge: String,

    /// The directory to download into (defaults to a directory named after the challenge)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

impl DownloadArgs {
    /// Directory the entries land in.
    pub fn target_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.challenge))
    }
}

/// Arguments for `pyweek verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The entry archive to check
    pub file: PathBuf,
}
