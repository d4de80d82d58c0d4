//! Row progress display for long renders

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_ROW_STRIDE};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} rows"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the rows of one render
///
/// Safe to update from the worker threads rendering rows. Rows are counted
/// as they finish and the bar is redrawn every `PROGRESS_ROW_STRIDE` rows.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar for `total_rows` rows labeled with `name`
    pub fn new(total_rows: usize, name: &str) -> Self {
        let bar = ProgressBar::new(total_rows as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message(name.to_string());
        Self { bar }
    }

    /// Create a bar that never draws, for quiet runs and tests
    pub fn hidden(total_rows: usize) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total_rows as u64), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Record one finished row
    pub fn row_finished(&self, y: usize) {
        self.bar.inc(1);
        if y % PROGRESS_ROW_STRIDE == 0 {
            self.bar.tick();
        }
    }

    /// Number of rows recorded so far
    pub fn rows_finished(&self) -> u64 {
        self.bar.position()
    }

    /// Stop the bar, leaving `message` and the elapsed time in place
    pub fn finish(&self, message: &str, elapsed: Duration) {
        self.bar
            .finish_with_message(format!("{message} in {elapsed:.2?}"));
    }
}
