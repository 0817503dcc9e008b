//! Runpanel client: HTTP access to the automation backend and the cycle orchestrator.
mod auto_probe;
mod backend;
mod orchestrator;
mod presenter;
mod settings;

pub use auto_probe::spawn_auto_probe;
pub use backend::{HealthProbe, JobSubmitter, ReqwestBackend};
pub use orchestrator::Orchestrator;
pub use presenter::{system_clock, Clock, Presenter};
pub use settings::{ClientSettings, SettingsError, DEFAULT_BASE_URL, HEALTH_PATH, RUN_JOB_PATH};
