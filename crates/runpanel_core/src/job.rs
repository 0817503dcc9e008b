use std::fmt;

use serde::Serialize;

/// Pause lengths, in seconds, that the backend applies between its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delays {
    #[serde(rename = "delay_after_like")]
    pub after_like: u32,
    #[serde(rename = "delay_after_comment")]
    pub after_comment: u32,
    #[serde(rename = "delay_between_accounts")]
    pub between_accounts: u32,
    #[serde(rename = "delay_between_rounds")]
    pub between_rounds: u32,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            after_like: 5,
            after_comment: 5,
            between_accounts: 5,
            between_rounds: 10,
        }
    }
}

/// Raw form state, exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobForm {
    /// One account per line, in whatever credential format the backend expects.
    pub accounts_input: String,
    pub target_post: String,
    /// One comment per line.
    pub comments_input: String,
    pub max_comments: String,
    pub iterations: String,
    pub delays: Delays,
    pub proxy: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            accounts_input: String::new(),
            target_post: String::new(),
            comments_input: String::new(),
            max_comments: "1".to_string(),
            iterations: "1".to_string(),
            delays: Delays::default(),
            proxy: String::new(),
        }
    }
}

impl JobForm {
    /// Checks the required fields and parses the counters.
    ///
    /// Text fields are passed through untouched; only the blank check trims.
    pub fn validate(&self) -> Result<JobConfig, ValidationError> {
        require(RequiredField::Accounts, &self.accounts_input)?;
        require(RequiredField::TargetPost, &self.target_post)?;
        require(RequiredField::Comments, &self.comments_input)?;
        let max_comments = parse_count(NumericField::MaxComments, &self.max_comments)?;
        let iterations = parse_count(NumericField::Iterations, &self.iterations)?;

        Ok(JobConfig {
            accounts_input: self.accounts_input.clone(),
            target_post: self.target_post.clone(),
            comments_input: self.comments_input.clone(),
            max_comments,
            iterations,
            delays: self.delays,
            proxy: self.proxy.clone(),
        })
    }
}

fn require(field: RequiredField, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::BlankField(field))
    } else {
        Ok(())
    }
}

fn parse_count(field: NumericField, raw: &str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidInteger {
            field,
            value: raw.to_string(),
        })
}

/// A validated job, serialized as the body of `POST /api/run-bot`.
///
/// Only [`JobForm::validate`] builds one, so the required fields are never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobConfig {
    accounts_input: String,
    target_post: String,
    comments_input: String,
    max_comments: u32,
    iterations: u32,
    #[serde(flatten)]
    delays: Delays,
    proxy: String,
}

impl JobConfig {
    pub fn accounts_input(&self) -> &str {
        &self.accounts_input
    }

    pub fn target_post(&self) -> &str {
        &self.target_post
    }

    pub fn comments_input(&self) -> &str {
        &self.comments_input
    }

    pub fn max_comments(&self) -> u32 {
        self.max_comments
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn delays(&self) -> Delays {
        self.delays
    }

    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    /// Number of non-empty lines in the accounts input.
    pub fn account_count(&self) -> usize {
        non_blank_lines(&self.accounts_input)
    }

    /// Number of non-empty lines in the comments input.
    pub fn comment_count(&self) -> usize {
        non_blank_lines(&self.comments_input)
    }
}

fn non_blank_lines(raw: &str) -> usize {
    raw.lines().filter(|line| !line.trim().is_empty()).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Accounts,
    TargetPost,
    Comments,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Accounts => write!(f, "account list"),
            RequiredField::TargetPost => write!(f, "target post URL"),
            RequiredField::Comments => write!(f, "comment list"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    MaxComments,
    Iterations,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericField::MaxComments => write!(f, "max comments"),
            NumericField::Iterations => write!(f, "iterations"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    BlankField(RequiredField),
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidInteger { field: NumericField, value: String },
}
