use std::fmt;

use crate::{JobResult, ValidationError};

/// Result of one health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable { message: String },
    Unreachable(UnreachableReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreachableReason {
    /// The backend answered with a non-2xx status.
    BadStatus(u16),
    /// DNS failure, refused connection or timeout.
    Network(String),
    /// 2xx answer without a usable `message`.
    InvalidBody(String),
}

impl fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnreachableReason::BadStatus(code) => write!(f, "bad status (HTTP {code})"),
            UnreachableReason::Network(detail) => write!(f, "network error ({detail})"),
            UnreachableReason::InvalidBody(detail) => {
                write!(f, "invalid health response ({detail})")
            }
        }
    }
}

/// Submission failed before a `JobResult` could be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportFailure,
    pub message: String,
    /// Message carried by an error body, when the backend sent one.
    pub detail: Option<String>,
}

impl TransportError {
    pub fn new(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    Network,
    Timeout,
    HttpStatus(u16),
    InvalidBody,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Network => write!(f, "network error"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::HttpStatus(code) => write!(f, "server error {code}"),
            TransportFailure::InvalidBody => write!(f, "invalid response body"),
        }
    }
}

/// How a submission cycle ended, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Succeeded(JobResult),
    /// The backend answered with `success == false`.
    ApplicationFailure(JobResult),
    TransportFailed(TransportError),
    ProbeFailed(UnreachableReason),
    ValidationFailed(ValidationError),
    /// Stop was requested while a call was in flight; its answer was discarded.
    Cancelled,
    /// Another cycle was already active; nothing happened.
    AlreadyRunning,
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Succeeded(_))
    }
}
