//! Terminal progress reporting for the fetch phase.

use super::Progress;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {msg}";

#[derive(Debug)]
struct DelayedState {
    start_time: Instant,
    delay: Duration,
    visible: AtomicBool,
}

/// A progress bar on stderr that stays hidden until the operation outlives `delay`.
///
/// Most runs finish in well under a second; hiding the bar until then keeps quick
/// runs from flashing an indicator.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Arc<DelayedState>,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden());
        if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }

        Self {
            bar,
            state: Arc::new(DelayedState {
                start_time: Instant::now(),
                delay,
                visible: AtomicBool::new(false),
            }),
        }
    }

    fn ensure_visible(&self) {
        if !self.state.visible.load(Ordering::Relaxed) && self.state.start_time.elapsed() >= self.state.delay {
            self.state.visible.store(true, Ordering::Relaxed);
            self.bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.visible.load(Ordering::Relaxed)
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
    }

    fn set_determinate(&self, len: u64, position: u64, message: &str) {
        // Keep the inner bar current even while hidden so it is right when it appears
        self.bar.set_length(len);
        self.bar.set_position(position);
        self.bar.set_message(message.to_string());
        if len > 0 {
            self.ensure_visible();
        }
    }

    fn done(&self) {
        if self.is_visible() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_stays_hidden_before_delay() {
        let reporter = ProgressReporter::new(Duration::from_secs(3600));
        reporter.set_phase("Analyzing");
        reporter.set_determinate(5, 1, "1/5 commits");
        assert!(!reporter.is_visible());
        reporter.done();
    }

    #[test]
    fn test_becomes_visible_after_delay_with_content() {
        let reporter = ProgressReporter::new(Duration::ZERO);
        reporter.set_determinate(0, 0, "");
        assert!(!reporter.is_visible());
        reporter.set_determinate(2, 1, "1/2 repository");
        assert!(reporter.is_visible());
        reporter.done();
    }
}
