//! Merges CLI flags, environment and the config file into runtime settings.

use pyweek_core::DEFAULT_BASE_URL;
use pyweek_core::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

use crate::app_config::FileConfig;
use crate::cli::Cli;

/// Environment variable overriding the service root.
pub(crate) const BASE_URL_ENV: &str = "PYWEEK_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuntimeSettings {
    pub(crate) base_url: String,
    pub(crate) connect_timeout_secs: u64,
    pub(crate) read_timeout_secs: u64,
}

/// Log level used when `RUST_LOG` is not set.
///
/// Priority: quiet flag > verbose flag > config verbosity > info.
pub(crate) fn resolve_default_log_level(cli: &Cli, file: Option<&FileConfig>) -> &'static str {
    if cli.quiet {
        return "error";
    }
    match cli.verbose {
        0 => file
            .and_then(|cfg| cfg.verbosity)
            .map_or("info", |verbosity| verbosity.log_level()),
        1 => "debug",
        _ => "trace",
    }
}

/// Priority for the base URL: `--base-url` > `PYWEEK_URL` > config file > default.
pub(crate) fn resolve_settings(
    cli: &Cli,
    env_base_url: Option<String>,
    file: Option<&FileConfig>,
) -> RuntimeSettings {
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env_base_url.filter(|value| !value.trim().is_empty()))
        .or_else(|| file.and_then(|cfg| cfg.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    RuntimeSettings {
        base_url,
        connect_timeout_secs: file
            .and_then(|cfg| cfg.connect_timeout_secs)
            .unwrap_or(CONNECT_TIMEOUT_SECS),
        read_timeout_secs: file
            .and_then(|cfg| cfg.read_timeout_secs)
            .unwrap_or(READ_TIMEOUT_SECS),
    }
}
