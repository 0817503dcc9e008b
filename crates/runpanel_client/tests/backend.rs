use std::time::Duration;

use runpanel_core::{JobForm, ProbeOutcome, TransportFailure, UnreachableReason};
use runpanel_client::{ClientSettings, HealthProbe, JobSubmitter, ReqwestBackend};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ReqwestBackend {
    let settings = ClientSettings::with_base_url(&server.uri()).expect("mock server url");
    ReqwestBackend::new(settings).expect("client")
}

fn form() -> JobForm {
    JobForm {
        accounts_input: "user1:pass1".to_string(),
        target_post: "https://x/p/1".to_string(),
        comments_input: "nice!".to_string(),
        max_comments: "5".to_string(),
        iterations: "1".to_string(),
        ..JobForm::default()
    }
}

#[tokio::test]
async fn probe_reports_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "message": "Server is running",
            "endpoints": {"health": "/api/health"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = backend_for(&server).check_health().await;
    assert_eq!(
        outcome,
        ProbeOutcome::Reachable {
            message: "Server is running".to_string()
        }
    );
}

#[tokio::test]
async fn probe_treats_non_success_status_as_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = backend_for(&server).check_health().await;
    assert_eq!(
        outcome,
        ProbeOutcome::Unreachable(UnreachableReason::BadStatus(503))
    );
}

#[tokio::test]
async fn probe_rejects_body_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("up"))
        .mount(&server)
        .await;

    let outcome = backend_for(&server).check_health().await;
    assert!(matches!(
        outcome,
        ProbeOutcome::Unreachable(UnreachableReason::InvalidBody(_))
    ));
}

#[tokio::test]
async fn probe_reports_network_error_when_nothing_listens() {
    // Port 1 is reserved and never serves HTTP locally.
    let settings = ClientSettings::with_base_url("http://127.0.0.1:1").unwrap();
    let outcome = ReqwestBackend::new(settings).unwrap().check_health().await;
    assert!(matches!(
        outcome,
        ProbeOutcome::Unreachable(UnreachableReason::Network(_))
    ));
}

#[tokio::test]
async fn probe_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"message": "late"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        probe_timeout: Duration::from_millis(50),
        ..ClientSettings::with_base_url(&server.uri()).unwrap()
    };
    let outcome = ReqwestBackend::new(settings).unwrap().check_health().await;
    assert!(matches!(
        outcome,
        ProbeOutcome::Unreachable(UnreachableReason::Network(_))
    ));
}

#[tokio::test]
async fn submit_posts_config_and_parses_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run-bot"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "accounts_input": "user1:pass1",
            "target_post": "https://x/p/1",
            "comments_input": "nice!",
            "max_comments": 5,
            "iterations": 1,
            "delay_after_like": 5,
            "delay_after_comment": 5,
            "delay_between_accounts": 5,
            "delay_between_rounds": 10,
            "proxy": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "done",
            "stats": {
                "total_comments": 3,
                "active_accounts": 1,
                "total_accounts": 1,
                "account_details": {"user1": 3}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = form().validate().unwrap();
    let result = backend_for(&server).submit(&config).await.expect("submit ok");
    assert!(result.success);
    assert_eq!(result.message, "done");
    let stats = result.stats.expect("stats");
    assert_eq!(stats.account_details.get("user1"), Some(&3));
}

#[tokio::test]
async fn submit_returns_application_failure_as_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run-bot"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "rate limited"})),
        )
        .mount(&server)
        .await;

    let config = form().validate().unwrap();
    let result = backend_for(&server).submit(&config).await.expect("answer");
    assert!(!result.success);
    assert_eq!(result.message, "rate limited");
    assert!(result.stats.is_none());
}

#[tokio::test]
async fn submit_fails_on_http_status_with_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run-bot"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"success": false, "message": "Field target_post is required"}),
        ))
        .mount(&server)
        .await;

    let config = form().validate().unwrap();
    let err = backend_for(&server).submit(&config).await.unwrap_err();
    assert_eq!(err.kind, TransportFailure::HttpStatus(400));
    assert_eq!(err.detail.as_deref(), Some("Field target_post is required"));
    assert!(err.to_string().contains("400"));
}

#[tokio::test]
async fn submit_fails_on_bare_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run-bot"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let config = form().validate().unwrap();
    let err = backend_for(&server).submit(&config).await.unwrap_err();
    assert_eq!(err.kind, TransportFailure::HttpStatus(502));
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn submit_rejects_unparseable_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run-bot"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let config = form().validate().unwrap();
    let err = backend_for(&server).submit(&config).await.unwrap_err();
    assert_eq!(err.kind, TransportFailure::InvalidBody);
}

#[tokio::test]
async fn submit_honours_transport_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run-bot"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"success": true, "message": "late"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        submit_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::with_base_url(&server.uri()).unwrap()
    };
    let config = form().validate().unwrap();
    let err = ReqwestBackend::new(settings)
        .unwrap()
        .submit(&config)
        .await
        .unwrap_err();
    assert_eq!(err.kind, TransportFailure::Timeout);
}
