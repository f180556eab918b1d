//! Terminal feedback: per-item spinners and run banners
//!
//! Transfers report at item granularity, so each item gets its own spinner
//! that is replaced by its result line when the bridge call returns.

use crossterm::style::{Color, Stylize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a single item is in flight.
pub struct ItemSpinner {
    spinner: ProgressBar,
}

impl ItemSpinner {
    /// A visible spinner, or a hidden one when `visible` is false (tests, pipes).
    pub fn start(msg: &str, visible: bool) -> Self {
        let spinner = if visible {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message(msg.to_string());
        Self { spinner }
    }

    pub fn finish_success(&self, line: &str) {
        self.spinner
            .finish_with_message(line.with(Color::Green).to_string());
    }

    pub fn finish_error(&self, line: &str) {
        self.spinner
            .finish_with_message(line.with(Color::Red).to_string());
    }
}

/// Opening banner of a run.
pub fn intro(title: &str) {
    println!();
    println!("{}", format!(" {} ", title).on(Color::Cyan).with(Color::Black).bold());
}

/// Closing line of a run.
pub fn outro(msg: &str) {
    println!("{} {}", "└".with(Color::DarkGrey), msg.bold());
    println!();
}

/// Error line for the user.
pub fn error_line(msg: &str) {
    eprintln!("{} {}", "Error:".with(Color::Red).bold(), msg);
}
