use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use panel_logging::{panel_error, panel_info, panel_trace};
use runpanel_core::{
    update, CycleOutcome, Effect, JobForm, Msg, PanelState, PanelViewModel, Phase,
};

use crate::backend::{HealthProbe, JobSubmitter};
use crate::presenter::{log_line, system_clock, Clock, Presenter};

/// Runs submission cycles: probe, validate, submit, report.
///
/// State lives behind a mutex that is never held across an await, so a
/// concurrent `run` sees the busy phase and is turned away, and `cancel`
/// can be called while a request is in flight.
pub struct Orchestrator {
    state: Mutex<PanelState>,
    probe: Arc<dyn HealthProbe>,
    submitter: Arc<dyn JobSubmitter>,
    presenter: Arc<dyn Presenter>,
    clock: Clock,
}

impl Orchestrator {
    pub fn new(
        probe: Arc<dyn HealthProbe>,
        submitter: Arc<dyn JobSubmitter>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            state: Mutex::new(PanelState::new()),
            probe,
            submitter,
            presenter,
            clock: system_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn phase(&self) -> Phase {
        self.lock_state().phase()
    }

    pub fn view(&self) -> PanelViewModel {
        self.lock_state().view()
    }

    /// Runs one full cycle for `form` and returns how it ended.
    ///
    /// The phase is back at Idle when this returns.
    pub async fn run(&self, form: JobForm) -> CycleOutcome {
        let mut queue: VecDeque<Effect> = {
            let mut state = self.lock_state();
            if !state.phase().is_idle() {
                panel_info!("run request rejected: cycle already in phase {:?}", state.phase());
                return CycleOutcome::AlreadyRunning;
            }
            apply(&mut state, Msg::RunRequested(form)).into()
        };

        while let Some(effect) = queue.pop_front() {
            let follow_up = match effect {
                Effect::ProbeBackend => {
                    let outcome = self.probe.check_health().await;
                    self.dispatch(Msg::ProbeCompleted(outcome))
                }
                Effect::SubmitJob(config) => {
                    // A stop can land while the presenter effects queued ahead of the job run.
                    let stopped = self.lock_state().is_cancel_requested();
                    if stopped {
                        self.dispatch(Msg::SubmitWithdrawn)
                    } else {
                        let result = self.submitter.submit(&config).await;
                        self.dispatch(Msg::SubmitCompleted(result))
                    }
                }
                other => {
                    self.present(other);
                    Vec::new()
                }
            };
            queue.extend(follow_up);
        }

        let mut state = self.lock_state();
        let outcome = match state.last_outcome() {
            Some(outcome) => outcome.clone(),
            None => {
                panel_error!("cycle ended in phase {:?} without an outcome", state.phase());
                CycleOutcome::Cancelled
            }
        };
        apply(&mut state, Msg::Settle);
        panel_info!("cycle finished: {:?}", outcome);
        outcome
    }

    /// Asks the running cycle to stop once its in-flight request resolves.
    ///
    /// Has no effect when nothing is in flight.
    pub fn cancel(&self) {
        for effect in self.dispatch(Msg::CancelRequested) {
            self.present(effect);
        }
    }

    fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut state = self.lock_state();
        apply(&mut state, msg)
    }

    fn present(&self, effect: Effect) {
        panel_trace!("presenting {:?}", effect);
        match effect {
            Effect::ClearLog => self.presenter.clear(),
            Effect::AppendLog(line) => log_line(self.presenter.as_ref(), &self.clock, &line),
            Effect::SetProgress { percent, status } => {
                self.presenter.set_progress(percent, &status)
            }
            Effect::ShowResults(stats) => self.presenter.show_results(&stats),
            Effect::ProbeBackend | Effect::SubmitJob(_) => {
                panel_error!("I/O effect {:?} reached the presenter", effect);
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply(state: &mut PanelState, msg: Msg) -> Vec<Effect> {
    let current = std::mem::take(state);
    let (next, effects) = update(current, msg);
    *state = next;
    effects
}
