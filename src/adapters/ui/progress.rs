//! Spinners for the loading states (location, prayer times, compass setup).

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a steady-ticking spinner. Call `finish_and_clear` when done.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
