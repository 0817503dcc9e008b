use panel_logging::panel_debug;

use crate::view_model::PanelViewModel;
use crate::{CycleOutcome, JobForm};

/// Where the orchestrator is within one submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Probing,
    Validating,
    Submitting,
    ProbeFailed,
    ValidationFailed,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_idle(self) -> bool {
        self == Phase::Idle
    }

    /// A network call has been issued and not yet answered.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Phase::Probing | Phase::Submitting)
    }

    /// The cycle has ended and is waiting for `Msg::Settle`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Phase::ProbeFailed | Phase::ValidationFailed | Phase::Succeeded | Phase::Failed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Progress {
    pub(crate) percent: u8,
    pub(crate) status: String,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            percent: 0,
            status: "Ready".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    phase: Phase,
    pending_form: JobForm,
    cancel_requested: bool,
    progress: Progress,
    outcome: Option<CycleOutcome>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    /// Outcome of the most recent cycle; cleared when a new cycle starts.
    pub fn last_outcome(&self) -> Option<&CycleOutcome> {
        self.outcome.as_ref()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel {
            phase: self.phase,
            run_enabled: self.phase.is_idle(),
            stop_enabled: self.phase.is_in_flight() && !self.cancel_requested,
            cancel_requested: self.cancel_requested,
            progress_percent: self.progress.percent,
            status: self.progress.status.clone(),
        }
    }

    pub(crate) fn begin_cycle(&mut self, form: JobForm) {
        self.pending_form = form;
        self.cancel_requested = false;
        self.outcome = None;
        self.enter(Phase::Probing);
    }

    pub(crate) fn take_pending_form(&mut self) -> JobForm {
        std::mem::take(&mut self.pending_form)
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        panel_debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Ends the cycle in a terminal phase, remembering how it went.
    pub(crate) fn finish(&mut self, phase: Phase, outcome: CycleOutcome) {
        self.outcome = Some(outcome);
        self.enter(phase);
    }

    /// Drops the cycle straight back to Idle after a stop request.
    pub(crate) fn abandon(&mut self) {
        self.outcome = Some(CycleOutcome::Cancelled);
        self.cancel_requested = false;
        self.enter(Phase::Idle);
    }

    pub(crate) fn settle(&mut self) {
        self.cancel_requested = false;
        self.enter(Phase::Idle);
    }

    pub(crate) fn request_cancel(&mut self) {
        self.cancel_requested = true;
    }

    pub(crate) fn set_progress(&mut self, percent: u8, status: &str) {
        self.progress = Progress {
            percent: percent.min(100),
            status: status.to_string(),
        };
    }
}
