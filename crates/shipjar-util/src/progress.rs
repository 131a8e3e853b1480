//! Terminal feedback for the CLI: aligned status lines and a spinner shown
//! while the host build runs.

use std::io::Write;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Done,
    Warning,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Done => Style::new().green().bold(),
            Tone::Warning => Style::new().yellow().bold(),
        }
    }
}

fn emit(tone: Tone, label: &str, message: &str) {
    let label = tone.style().apply_to(label);
    let _ = writeln!(std::io::stderr(), "{label:>LABEL_WIDTH$} {message}");
}

/// `   Published com.example:core:1.0.0` on stderr, label in green.
pub fn status(label: &str, message: &str) {
    emit(Tone::Done, label, message);
}

/// Same layout as [`status`] with a yellow label.
pub fn status_warn(label: &str, message: &str) {
    emit(Tone::Warning, label, message);
}

/// Spinner for work of unknown length. Hidden when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
