//! Spinner helpers using indicatif

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for a blocking stage step
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("    {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a spinner with a success message
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✅ {}", message));
}

/// Finish a spinner with a warning message
pub fn finish_with_warning(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("⚠️  {}", message));
}

/// Run `work` behind a spinner.
///
/// On success the spinner finishes with `done(&value)`; on failure it is
/// abandoned with a failure mark so the step that broke stays on screen.
pub fn run_with_spinner<T>(
    message: &str,
    work: impl FnOnce() -> Result<T>,
    done: impl FnOnce(&T) -> String,
) -> Result<T> {
    let pb = create_spinner(message);
    match work() {
        Ok(value) => {
            finish_with_success(&pb, &done(&value));
            Ok(value)
        }
        Err(err) => {
            pb.abandon_with_message(format!("❌ {}", message.trim_end_matches("...")));
            Err(err)
        }
    }
}
