use std::sync::Arc;

use chrono::NaiveTime;
use panel_logging::format_log_line;
use runpanel_core::Stats;

/// Sink for everything a submission cycle wants to show.
pub trait Presenter: Send + Sync {
    /// Empties the log display and hides earlier results.
    fn clear(&self);
    /// `line` is already timestamped.
    fn append_log(&self, line: &str);
    fn set_progress(&self, percent: u8, status: &str);
    fn show_results(&self, stats: &Stats);
}

/// Source of the wall-clock time printed in front of log lines.
pub type Clock = Arc<dyn Fn() -> NaiveTime + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| chrono::Local::now().time())
}

pub(crate) fn log_line(presenter: &dyn Presenter, clock: &Clock, message: &str) {
    presenter.append_log(&format_log_line(clock(), message));
}
