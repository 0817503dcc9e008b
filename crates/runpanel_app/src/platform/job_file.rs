//! Job files: the on-disk replacement for the panel's input form.
//!
//! ```ron
//! (
//!     backend_url: Some("http://localhost:5000"),
//!     accounts: ["user1:pass1", "user2:pass2"],
//!     target_post: "https://example.com/p/1",
//!     comments: "nice!\ngreat shot",
//!     max_comments: 5,
//!     iterations: 1,
//!     delays: (between_rounds: Some(30)),
//! )
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use panel_logging::panel_info;
use runpanel_core::{Delays, JobForm};
use serde::Deserialize;

/// Either one multi-line string or a list of lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Lines {
    Text(String),
    List(Vec<String>),
}

impl Default for Lines {
    fn default() -> Self {
        Lines::Text(String::new())
    }
}

impl Lines {
    fn into_text(self) -> String {
        match self {
            Lines::Text(text) => text,
            Lines::List(lines) => lines.join("\n"),
        }
    }
}

/// Counters stay raw text so that bad values are reported by form validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(i64),
    Text(String),
}

impl Default for RawCount {
    fn default() -> Self {
        RawCount::Number(1)
    }
}

impl RawCount {
    fn into_text(self) -> String {
        match self {
            RawCount::Number(value) => value.to_string(),
            RawCount::Text(text) => text,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DelayOverrides {
    #[serde(default)]
    after_like: Option<u32>,
    #[serde(default)]
    after_comment: Option<u32>,
    #[serde(default)]
    between_accounts: Option<u32>,
    #[serde(default)]
    between_rounds: Option<u32>,
}

impl DelayOverrides {
    fn apply(self, base: Delays) -> Delays {
        Delays {
            after_like: self.after_like.unwrap_or(base.after_like),
            after_comment: self.after_comment.unwrap_or(base.after_comment),
            between_accounts: self.between_accounts.unwrap_or(base.between_accounts),
            between_rounds: self.between_rounds.unwrap_or(base.between_rounds),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PersistedJob {
    backend_url: Option<String>,
    accounts: Lines,
    target_post: String,
    comments: Lines,
    max_comments: RawCount,
    iterations: RawCount,
    delays: DelayOverrides,
    proxy: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedJob {
    pub form: JobForm,
    pub backend_url: Option<String>,
}

pub(crate) fn load_job(path: &Path) -> Result<LoadedJob> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading job file {:?}", path))?;
    let job = parse_job(&content).with_context(|| format!("parsing job file {:?}", path))?;
    panel_info!("Loaded job file {:?}", path);
    Ok(job)
}

pub(crate) fn parse_job(content: &str) -> Result<LoadedJob> {
    let job: PersistedJob = ron::from_str(content)?;
    let form = JobForm {
        accounts_input: job.accounts.into_text(),
        target_post: job.target_post,
        comments_input: job.comments.into_text(),
        max_comments: job.max_comments.into_text(),
        iterations: job.iterations.into_text(),
        delays: job.delays.apply(Delays::default()),
        proxy: job.proxy,
    };
    Ok(LoadedJob {
        form,
        backend_url: job.backend_url,
    })
}
