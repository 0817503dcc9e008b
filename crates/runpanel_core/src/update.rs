use panel_logging::{panel_debug, panel_warn};

use crate::{
    CycleOutcome, Effect, JobResult, Msg, PanelState, Phase, ProbeOutcome, TransportError,
};

/// Troubleshooting lines shown after the backend could not be reached.
pub const CONNECTIVITY_HINTS: [&str; 4] = [
    "Make sure that:",
    "  1. the backend server is running",
    "  2. no firewall is blocking the connection",
    "  3. the backend port is available",
];

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::RunRequested(form) => {
            if !state.phase().is_idle() {
                panel_debug!("run request ignored in phase {:?}", state.phase());
                return (state, Vec::new());
            }
            state.begin_cycle(form);
            vec![
                Effect::log("Checking backend connection..."),
                Effect::ProbeBackend,
            ]
        }
        Msg::ProbeCompleted(outcome) => probe_completed(&mut state, outcome),
        Msg::SubmitWithdrawn => submit_withdrawn(&mut state),
        Msg::SubmitCompleted(result) => submit_completed(&mut state, result),
        Msg::CancelRequested => {
            if state.phase().is_in_flight() && !state.is_cancel_requested() {
                state.request_cancel();
                vec![
                    Effect::log("Stop requested; waiting for the in-flight request"),
                    progress(&mut state, 0, "Stopped"),
                ]
            } else {
                Vec::new()
            }
        }
        Msg::Settle => {
            if state.phase().is_terminal() {
                state.settle();
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Log lines describing a probe result.
pub fn probe_report(outcome: &ProbeOutcome) -> Vec<String> {
    match outcome {
        ProbeOutcome::Reachable { message } => vec![format!("Connected to backend: {message}")],
        ProbeOutcome::Unreachable(reason) => {
            let mut lines = vec![format!("Cannot reach backend: {reason}")];
            lines.extend(CONNECTIVITY_HINTS.iter().map(|hint| hint.to_string()));
            lines
        }
    }
}

fn probe_completed(state: &mut PanelState, outcome: ProbeOutcome) -> Vec<Effect> {
    if state.phase() != Phase::Probing {
        panel_debug!("stale probe result ignored in phase {:?}", state.phase());
        return Vec::new();
    }
    if state.is_cancel_requested() {
        state.abandon();
        return vec![Effect::log("Run stopped before submission")];
    }

    let mut effects: Vec<Effect> = probe_report(&outcome)
        .into_iter()
        .map(Effect::AppendLog)
        .collect();

    match outcome {
        ProbeOutcome::Unreachable(reason) => {
            effects.push(progress(state, 0, "Failed to connect to backend"));
            state.finish(Phase::ProbeFailed, CycleOutcome::ProbeFailed(reason));
        }
        ProbeOutcome::Reachable { .. } => {
            state.enter(Phase::Validating);
            match state.take_pending_form().validate() {
                Err(err) => {
                    effects.push(Effect::log(format!("Invalid job configuration: {err}")));
                    effects.push(progress(state, 0, "Invalid job configuration"));
                    state.finish(Phase::ValidationFailed, CycleOutcome::ValidationFailed(err));
                }
                Ok(config) => {
                    state.enter(Phase::Submitting);
                    effects.push(Effect::ClearLog);
                    effects.push(Effect::log("Starting run..."));
                    effects.push(progress(state, 20, "Processing data..."));
                    effects.push(Effect::log(format!(
                        "Sending job to backend ({} accounts, {} comments)...",
                        config.account_count(),
                        config.comment_count()
                    )));
                    effects.push(Effect::SubmitJob(config));
                }
            }
        }
    }
    effects
}

fn submit_withdrawn(state: &mut PanelState) -> Vec<Effect> {
    if state.phase() != Phase::Submitting || !state.is_cancel_requested() {
        panel_debug!(
            "withdrawal ignored in phase {:?} (stop requested: {})",
            state.phase(),
            state.is_cancel_requested()
        );
        return Vec::new();
    }
    state.abandon();
    vec![Effect::log("Run stopped before submission")]
}

fn submit_completed(
    state: &mut PanelState,
    result: Result<JobResult, TransportError>,
) -> Vec<Effect> {
    if state.phase() != Phase::Submitting {
        panel_debug!("stale submit result ignored in phase {:?}", state.phase());
        return Vec::new();
    }
    if state.is_cancel_requested() {
        state.abandon();
        return vec![Effect::log("Run stopped; backend response discarded")];
    }

    match result {
        Ok(result) if result.success => {
            let mut effects = vec![
                Effect::log("Job sent, response received"),
                Effect::log(result.message.clone()),
                progress(state, 100, "Done!"),
            ];
            if let Some(stats) = &result.stats {
                if !stats.accounts_consistent() {
                    panel_warn!(
                        "backend reported {} active accounts out of {}",
                        stats.active_accounts,
                        stats.total_accounts
                    );
                }
                effects.push(Effect::ShowResults(stats.clone()));
            }
            state.finish(Phase::Succeeded, CycleOutcome::Succeeded(result));
            effects
        }
        Ok(result) => {
            let effects = vec![
                Effect::log("Job sent, response received"),
                Effect::log(result.message.clone()),
                progress(state, 0, "Run failed"),
            ];
            state.finish(Phase::Failed, CycleOutcome::ApplicationFailure(result));
            effects
        }
        Err(err) => {
            let mut effects = vec![Effect::log(format!("Error: {err}"))];
            effects.extend(CONNECTIVITY_HINTS.iter().map(|hint| Effect::log(*hint)));
            effects.push(progress(state, 0, "Request failed"));
            state.finish(Phase::Failed, CycleOutcome::TransportFailed(err));
            effects
        }
    }
}

fn progress(state: &mut PanelState, percent: u8, status: &str) -> Effect {
    state.set_progress(percent, status);
    Effect::SetProgress {
        percent,
        status: status.to_string(),
    }
}
