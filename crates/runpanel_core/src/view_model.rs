use crate::{Phase, Stats};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    pub phase: Phase,
    pub run_enabled: bool,
    pub stop_enabled: bool,
    pub cancel_requested: bool,
    pub progress_percent: u8,
    pub status: String,
}

/// Text rendering of run statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub total_line: String,
    pub accounts_line: String,
    /// One `name: N comments` entry per account, in backend order.
    pub entries: Vec<String>,
}

impl ResultsView {
    pub fn from_stats(stats: &Stats) -> Self {
        let entries = stats
            .account_details
            .iter()
            .map(|(account, count)| format!("{account}: {}", comment_count(*count)))
            .collect();

        Self {
            total_line: format!("Total comments sent: {}", stats.total_comments),
            accounts_line: format!(
                "Successful accounts: {} of {}",
                stats.active_accounts, stats.total_accounts
            ),
            entries,
        }
    }

    /// All lines in display order, with the per-account list under a heading.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 3);
        lines.push(self.total_line.clone());
        lines.push(self.accounts_line.clone());
        lines.push("Per-account breakdown:".to_string());
        lines.extend(self.entries.iter().map(|entry| format!("  - {entry}")));
        lines
    }
}

fn comment_count(count: u64) -> String {
    if count == 1 {
        "1 comment".to_string()
    } else {
        format!("{count} comments")
    }
}
