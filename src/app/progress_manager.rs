//! Progress bar for file transfers.

use indicatif::{ProgressBar, ProgressStyle};
use pyweek_core::{NoProgress, TransferKind, TransferProgress};

const BAR_TEMPLATE: &str =
    "{msg} {percent:>3}% {wide_bar} {eta} {bytes}/{total_bytes} {bytes_per_sec}";

/// Draws one `indicatif` bar per transfer on stderr.
#[derive(Debug, Default)]
pub(crate) struct BarProgress {
    bar: Option<ProgressBar>,
}

impl TransferProgress for BarProgress {
    fn start(&mut self, label: &str, _kind: TransferKind, current: u64, total: u64) {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("\u{2588}> "),
        );
        bar.set_message(label.to_string());
        bar.set_position(current);
        self.bar = Some(bar);
    }

    fn advance(&mut self, current: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(current);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// Returns a bar-drawing sink when enabled, otherwise a no-op one.
pub(crate) fn progress_sink(enabled: bool) -> Box<dyn TransferProgress> {
    if enabled {
        Box::new(BarProgress::default())
    } else {
        Box::new(NoProgress)
    }
}
