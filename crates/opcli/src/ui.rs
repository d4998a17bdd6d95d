//! Terminal progress helpers

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Start a steady-tick spinner with the given message. Callers clear it with
/// `finish_and_clear` once the operation resolves.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.to_string());
    spinner
}
