use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use pyweek_core::{ChallengeDownloader, HttpClient, HttpManifestSource, validate};
use tracing::{debug, info};

use crate::app::{config_runtime, exit_handler, progress_manager, terminal};
use crate::app_config::{self, FileConfig};
use crate::cli::{Cli, Command, DownloadArgs, VerifyArgs};
use crate::{ProcessExit, output};

pub(crate) async fn run_pyweek() -> Result<ProcessExit> {
    let cli = Cli::parse();
    let file_config = app_config::load_default_file_config()?;

    let no_color = terminal::is_no_color_requested(&cli);
    let default_level = config_runtime::resolve_default_log_level(&cli, file_config.as_ref());
    terminal::init_tracing(default_level, no_color);

    debug!(?cli, "CLI arguments parsed");

    match &cli.command {
        Command::Download(args) => run_download(&cli, args, file_config.as_ref(), no_color).await,
        Command::Verify(args) => run_verify(args, no_color).await,
    }
}

async fn run_download(
    cli: &Cli,
    args: &DownloadArgs,
    file_config: Option<&FileConfig>,
    no_color: bool,
) -> Result<ProcessExit> {
    let settings = config_runtime::resolve_settings(
        cli,
        std::env::var(config_runtime::BASE_URL_ENV).ok(),
        file_config,
    );
    debug!(?settings, "runtime settings resolved");

    let client =
        HttpClient::new_with_timeouts(settings.connect_timeout_secs, settings.read_timeout_secs);
    let manifests = HttpManifestSource::new(&client, &settings.base_url);
    let downloader = ChallengeDownloader::new(&client, &manifests);

    let target_dir = args.target_directory();
    info!(dir = %target_dir.display(), "Downloading challenge {}", args.challenge);

    let show_progress = terminal::should_show_progress(
        io::stderr().is_terminal(),
        cli.quiet,
        terminal::is_dumb_terminal(),
    );
    let mut progress = progress_manager::progress_sink(show_progress);

    let report = downloader
        .download_challenge(&args.challenge, &target_dir, progress.as_mut())
        .await
        .with_context(|| format!("Failed to download challenge {}", args.challenge))?;

    for reason in report.failures() {
        debug!(reason, "file not downloaded");
    }
    output::print_download_summary(&report, !no_color);
    Ok(exit_handler::determine_exit_outcome(report.error_count()))
}

async fn run_verify(args: &VerifyArgs, no_color: bool) -> Result<ProcessExit> {
    let path = args.file.clone();
    let report = tokio::task::spawn_blocking(move || validate(&path))
        .await
        .context("Archive verification task failed")?;
    debug!(
        violations = report.error_count(),
        fatal = report.is_fatal(),
        "verification finished"
    );

    output::print_verify_report(&args.file, &report, !no_color);
    Ok(exit_handler::determine_exit_outcome(report.error_count()))
}
