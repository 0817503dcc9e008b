use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of one backend run as reported by `POST /api/run-bot`.
///
/// `success == false` is a well-formed answer: the backend processed the
/// request and `message` explains why the run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_comments: u64,
    pub active_accounts: u64,
    pub total_accounts: u64,
    /// Comments sent per account, in the order the backend listed them.
    #[serde(default)]
    pub account_details: IndexMap<String, u64>,
}

impl Stats {
    /// Whether the account counters agree with each other.
    ///
    /// The per-account sum is not compared with `total_comments`.
    pub fn accounts_consistent(&self) -> bool {
        self.active_accounts <= self.total_accounts
    }
}
