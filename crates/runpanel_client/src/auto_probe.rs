use std::sync::Arc;
use std::time::Duration;

use runpanel_core::{probe_report, ProbeOutcome};
use tokio::task::JoinHandle;

use crate::backend::HealthProbe;
use crate::presenter::{log_line, Clock, Presenter};

/// Schedules one background health probe after `delay`.
///
/// Returns `None` when `delay` is `None`. The probe only writes to the
/// presenter; it never touches an orchestrator's state. Must be called from
/// inside a tokio runtime.
pub fn spawn_auto_probe(
    probe: Arc<dyn HealthProbe>,
    presenter: Arc<dyn Presenter>,
    clock: Clock,
    delay: Option<Duration>,
) -> Option<JoinHandle<ProbeOutcome>> {
    let delay = delay?;
    Some(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        log_line(presenter.as_ref(), &clock, "Auto-testing backend connection...");
        let outcome = probe.check_health().await;
        for line in probe_report(&outcome) {
            log_line(presenter.as_ref(), &clock, &line);
        }
        outcome
    }))
}
