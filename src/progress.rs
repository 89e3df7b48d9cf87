//! Progress bar wiring.
//!
//! Bridges the orchestrator's [`ProgressSink`] to an indicatif bar so the
//! user sees a monotone completed-count out of the fixed total.

use core_resolve::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

/// Create the resolution progress bar.
pub fn resolution_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})")
            .unwrap()
            .progress_chars("=> "),
    );
    bar
}

/// [`ProgressSink`] implementation backed by an indicatif bar.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressSink for BarSink {
    fn on_resolved(&self, completed: usize, _total: usize) {
        self.bar.set_position(completed as u64);
    }
}
