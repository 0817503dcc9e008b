use std::io::{self, Write};
use std::sync::Mutex;

use runpanel_client::Presenter;
use runpanel_core::{ResultsView, Stats};

const BAR_WIDTH: usize = 20;

/// Presents a cycle as plain text lines on a writer (stdout in the binary).
pub struct TerminalPresenter<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_lines<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for line in lines {
            // A closed stdout must not abort the cycle.
            let _ = writeln!(out, "{}", line.as_ref());
        }
        let _ = out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn clear(&self) {
        self.write_lines(["-".repeat(BAR_WIDTH + 8)]);
    }

    fn append_log(&self, line: &str) {
        self.write_lines([line]);
    }

    fn set_progress(&self, percent: u8, status: &str) {
        self.write_lines([render_progress(percent, status)]);
    }

    fn show_results(&self, stats: &Stats) {
        let view = ResultsView::from_stats(stats);
        let mut lines = vec!["Results:".to_string()];
        lines.extend(view.lines().into_iter().map(|line| format!("  {line}")));
        self.write_lines(lines);
    }
}

fn render_progress(percent: u8, status: &str) -> String {
    let percent = percent.min(100);
    let filled = usize::from(percent) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}% {}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percent,
        status
    )
}
