//! Progress bar reporting for index builds and renders

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BAR_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Counter-style progress bar for a single long-running pass
///
/// Used once per index build (one step per candidate file) and once per
/// render (one step per grid cell). Suppressed entirely in quiet mode by
/// never constructing one.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a progress bar over `total` steps
    pub fn new(total: u64, message: &'static str) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(BAR_STYLE.clone());
        bar.set_message(message);
        Self { bar }
    }

    /// Record one completed step
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
