use crate::{JobForm, JobResult, ProbeOutcome, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked to run a job with the current form contents.
    RunRequested(JobForm),
    /// Health probe finished.
    ProbeCompleted(ProbeOutcome),
    /// A stop arrived after the job was queued but before it was sent.
    SubmitWithdrawn,
    /// Job submission finished, either with a backend result or a transport error.
    SubmitCompleted(Result<JobResult, TransportError>),
    /// User clicked Stop.
    CancelRequested,
    /// The cycle outcome has been reported; return a terminal phase to Idle.
    Settle,
}
