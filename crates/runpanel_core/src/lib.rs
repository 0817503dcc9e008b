//! Runpanel core: job model, validation and the pure submission state machine.
mod effect;
mod job;
mod msg;
mod outcome;
mod result;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use job::{Delays, JobConfig, JobForm, NumericField, RequiredField, ValidationError};
pub use msg::Msg;
pub use outcome::{CycleOutcome, ProbeOutcome, TransportError, TransportFailure, UnreachableReason};
pub use result::{JobResult, Stats};
pub use state::{PanelState, Phase};
pub use update::{probe_report, update, CONNECTIVITY_HINTS};
pub use view_model::{PanelViewModel, ResultsView};
