use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use status_engine::{
    ClientConfig, ClientSettings, EngineEvent, EngineHandle, ReqwestStatusClient, Request,
    StaticTokenProvider, StatusClient,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wait_for_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            return event;
        }
    }
    panic!("no engine event within deadline");
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_reports_completion_with_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "mobile_number": "+91111", "message": "negative", "colour": "#00FF00" }
        ])))
        .mount(&server)
        .await;

    let config = ClientConfig::new(
        &server.uri(),
        Arc::new(StaticTokenProvider::new("tok")),
        ClientSettings::default(),
    )
    .expect("config");
    let client: Arc<dyn StatusClient> = Arc::new(ReqwestStatusClient::new(config).expect("client"));
    let engine = EngineHandle::new(client);

    engine.submit(42, Request::Scan);
    let event = tokio::task::spawn_blocking(move || wait_for_event(&engine))
        .await
        .expect("join");

    assert_eq!(event.request_id(), 42);
    match event {
        EngineEvent::ScanDone { result, .. } => {
            let entries = result.expect("scan ok");
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].mobile_number, "+91111");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_reports_auth_failure() {
    let server = MockServer::start().await;
    let config = ClientConfig::new(
        &server.uri(),
        Arc::new(StaticTokenProvider::signed_out()),
        ClientSettings::default(),
    )
    .expect("config");
    let client: Arc<dyn StatusClient> = Arc::new(ReqwestStatusClient::new(config).expect("client"));
    let engine = EngineHandle::new(client);

    engine.submit(
        3,
        Request::Lookup {
            number: "+91".into(),
        },
    );
    let event = tokio::task::spawn_blocking(move || wait_for_event(&engine))
        .await
        .expect("join");

    match event {
        EngineEvent::LookupDone { request_id, result } => {
            assert_eq!(request_id, 3);
            assert!(result.unwrap_err().is_auth());
        }
        other => panic!("unexpected event {other:?}"),
    }
}
