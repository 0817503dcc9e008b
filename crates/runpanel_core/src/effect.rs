use crate::{JobConfig, Stats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Clear the log display and hide previous results.
    ClearLog,
    AppendLog(String),
    SetProgress { percent: u8, status: String },
    ShowResults(Stats),
    /// Check that the backend is reachable; answer with `Msg::ProbeCompleted`.
    ProbeBackend,
    /// Post the job to the backend; answer with `Msg::SubmitCompleted`.
    SubmitJob(JobConfig),
}

impl Effect {
    pub(crate) fn log(line: impl Into<String>) -> Self {
        Effect::AppendLog(line.into())
    }
}
