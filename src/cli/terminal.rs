//! Terminal capability detection and utilities

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::{OwoColorize, colors::css};

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

/// Enables or disables colored output, e.g. from configuration.
pub fn set_color_enabled(enabled: bool) {
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    COLOR_ENABLED.load(Ordering::Relaxed)
        && supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as failure (red)
    fn failure(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn failure(&self) -> String {
        if supports_color() {
            self.fg::<css::Red>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn failure(&self) -> String {
        self.as_str().failure()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
