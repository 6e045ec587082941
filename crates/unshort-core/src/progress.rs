//! Cosmetic progress indicator shown while a batch is expanding.
//!
//! indicatif ticks the spinner on its own thread; the pipeline never waits
//! on it. `stop()` (or drop) is the explicit stop signal.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Ticking frames; the trailing space is the finished frame.
const TICK_CHARS: &str = "|/-\\ ";
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Spinning cursor rendered as `<label> <frame>`.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Starts spinning on stderr.
    pub fn start(label: &str) -> Self {
        Self::start_with_target(label, ProgressDrawTarget::stderr())
    }

    /// Starts spinning on `target`.
    pub fn start_with_target(label: &str, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        let style = ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner().tick_chars(TICK_CHARS));
        bar.set_style(style);
        bar.set_message(label.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar }
    }

    /// Runs `f` with the spinner line hidden, so output from `f` is not mangled.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Stops ticking and clears the spinner line.
    pub fn stop(self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
