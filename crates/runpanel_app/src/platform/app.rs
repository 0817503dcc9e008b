use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use panel_logging::{panel_info, panel_warn};
use runpanel_client::{
    spawn_auto_probe, system_clock, ClientSettings, HealthProbe, Orchestrator, Presenter,
    ReqwestBackend,
};
use runpanel_core::{probe_report, CycleOutcome, JobForm, ProbeOutcome};
use tokio::task::JoinHandle;

use super::cli::{Cli, Command};
use super::job_file::{load_job, LoadedJob};
use super::logging;
use super::terminal::TerminalPresenter;

pub fn run_app() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(cli.log_file.as_deref(), cli.verbose);

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;

    match cli.command {
        Command::Probe => {
            let settings = resolve_settings(cli.backend_url.as_deref(), None)?;
            let backend = ReqwestBackend::new(settings).context("building http client")?;
            let presenter = TerminalPresenter::stdout();
            let clock = system_clock();

            presenter.append_log(&panel_logging::format_log_line(
                clock(),
                "Checking backend connection...",
            ));
            let outcome = runtime.block_on(backend.check_health());
            for line in probe_report(&outcome) {
                presenter.append_log(&panel_logging::format_log_line(clock(), &line));
            }
            Ok(exit_code(matches!(outcome, ProbeOutcome::Reachable { .. })))
        }
        Command::Run {
            job,
            max_comments,
            iterations,
            auto_probe_after,
            timeout,
        } => {
            let LoadedJob {
                mut form,
                backend_url,
            } = load_job(&job)?;
            if let Some(value) = max_comments {
                form.max_comments = value;
            }
            if let Some(value) = iterations {
                form.iterations = value;
            }

            let mut settings =
                resolve_settings(cli.backend_url.as_deref(), backend_url.as_deref())?;
            settings.submit_timeout = timeout.map(Duration::from_secs);
            panel_info!("Using backend {}", settings.base_url);

            let backend =
                Arc::new(ReqwestBackend::new(settings).context("building http client")?);
            let presenter: Arc<dyn Presenter> = Arc::new(TerminalPresenter::stdout());
            let orchestrator = Arc::new(Orchestrator::new(
                backend.clone(),
                backend.clone(),
                presenter.clone(),
            ));

            let canceller = orchestrator.clone();
            runtime.spawn(async move {
                if tokio::signal::ctrl_c().await.is_err() {
                    return;
                }
                if canceller.phase().is_idle() {
                    panel_warn!("Interrupted before the run started");
                    std::process::exit(130);
                }
                canceller.cancel();
                if tokio::signal::ctrl_c().await.is_ok() {
                    panel_warn!("Second interrupt; exiting without waiting for the backend");
                    std::process::exit(130);
                }
            });

            let probe: Arc<dyn HealthProbe> = backend;
            let outcome = runtime.block_on(async {
                let auto_probe = spawn_auto_probe(
                    probe,
                    presenter,
                    system_clock(),
                    auto_probe_after.map(Duration::from_millis),
                );
                run_after_auto_probe(&orchestrator, auto_probe, form).await
            });

            Ok(exit_code(outcome.is_success()))
        }
    }
}

/// Waits for a scheduled auto-probe to finish, then runs the cycle.
async fn run_after_auto_probe(
    orchestrator: &Orchestrator,
    auto_probe: Option<JoinHandle<ProbeOutcome>>,
    form: JobForm,
) -> CycleOutcome {
    if let Some(handle) = auto_probe {
        if let Err(err) = handle.await {
            panel_warn!("auto-probe task ended abnormally: {}", err);
        }
    }
    orchestrator.run(form).await
}

/// CLI flag first, then the job file, then the built-in default.
fn resolve_settings(cli_url: Option<&str>, job_url: Option<&str>) -> Result<ClientSettings> {
    match cli_url.or(job_url) {
        Some(url) => ClientSettings::with_base_url(url).context("configuring backend url"),
        None => Ok(ClientSettings::default()),
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
