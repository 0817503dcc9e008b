use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveTime;
use runpanel_client::{
    spawn_auto_probe, ClientSettings, Clock, HealthProbe, Presenter, ReqwestBackend,
};
use runpanel_core::{ProbeOutcome, Stats, UnreachableReason};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct LogOnlyPresenter {
    lines: Mutex<Vec<String>>,
}

impl Presenter for LogOnlyPresenter {
    fn clear(&self) {}

    fn append_log(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }

    fn set_progress(&self, _percent: u8, _status: &str) {
        panic!("auto-probe must not touch progress");
    }

    fn show_results(&self, _stats: &Stats) {
        panic!("auto-probe must not show results");
    }
}

fn clock() -> Clock {
    Arc::new(|| NaiveTime::from_hms_opt(8, 30, 0).unwrap())
}

#[tokio::test]
async fn disabled_auto_probe_schedules_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "up"})))
        .expect(0)
        .mount(&server)
        .await;

    let backend: Arc<dyn HealthProbe> = Arc::new(
        ReqwestBackend::new(ClientSettings::with_base_url(&server.uri()).unwrap()).unwrap(),
    );
    let presenter = Arc::new(LogOnlyPresenter::default());

    let handle = spawn_auto_probe(backend, presenter.clone(), clock(), None);
    assert!(handle.is_none());
    assert!(presenter.lines.lock().unwrap().is_empty());
}

#[tokio::test]
async fn auto_probe_logs_connection_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "up"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend: Arc<dyn HealthProbe> = Arc::new(
        ReqwestBackend::new(ClientSettings::with_base_url(&server.uri()).unwrap()).unwrap(),
    );
    let presenter = Arc::new(LogOnlyPresenter::default());

    let handle = spawn_auto_probe(
        backend,
        presenter.clone(),
        clock(),
        Some(Duration::from_millis(10)),
    )
    .expect("scheduled");
    let outcome = handle.await.expect("probe task");

    assert_eq!(
        outcome,
        ProbeOutcome::Reachable {
            message: "up".to_string()
        }
    );
    assert_eq!(
        *presenter.lines.lock().unwrap(),
        vec![
            "[08:30:00] Auto-testing backend connection...".to_string(),
            "[08:30:00] Connected to backend: up".to_string(),
        ]
    );
}

#[tokio::test]
async fn auto_probe_reports_bad_status_with_hints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend: Arc<dyn HealthProbe> = Arc::new(
        ReqwestBackend::new(ClientSettings::with_base_url(&server.uri()).unwrap()).unwrap(),
    );
    let presenter = Arc::new(LogOnlyPresenter::default());

    let outcome = spawn_auto_probe(backend, presenter.clone(), clock(), Some(Duration::ZERO))
        .expect("scheduled")
        .await
        .expect("probe task");

    assert_eq!(
        outcome,
        ProbeOutcome::Unreachable(UnreachableReason::BadStatus(500))
    );
    let lines = presenter.lines.lock().unwrap();
    assert_eq!(lines[1], "[08:30:00] Cannot reach backend: bad status (HTTP 500)");
    assert_eq!(lines.len(), 2 + runpanel_core::CONNECTIVITY_HINTS.len());
}
