//! Graph client and end-to-end runs against a mock directory.

use chrono::{TimeZone, Utc};
use secret_monitor::clock::FixedClock;
use secret_monitor::settings::Secret;
use secret_monitor::{
    AppContext, DirectoryClient, DirectoryError, Error, GraphClient, OutputFormat, RunSettings,
    SecretMonitor,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TENANT: &str = "contoso";
const SELECT: &str = "appId,displayName,tags,passwordCredentials";

fn settings(server: &MockServer, format: OutputFormat) -> RunSettings {
    RunSettings {
        tenant_id: TENANT.into(),
        client_id: "monitor-client".into(),
        client_secret: Secret::new("monitor-secret"),
        monitor_tag: "MonitorSecrets".into(),
        expiry_threshold_days: 30,
        format,
        authority_host: server.uri(),
        graph_endpoint: server.uri(),
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/{TENANT}/oauth2/v2.0/token")))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=monitor-client"))
        .and(body_string_contains("client_secret=monitor-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "test-token"
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn app(name: &str, app_id: &str, tags: &[&str], end: Option<&str>) -> Value {
    json!({
        "appId": app_id,
        "displayName": name,
        "tags": tags,
        "passwordCredentials": [
            { "keyId": format!("{app_id}-key"), "endDateTime": end, "displayName": "ci" }
        ]
    })
}

#[tokio::test]
async fn test_lists_applications_with_bearer_token() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .and(query_param("$select", SELECT))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                app("MyApp1", "app-1", &["MonitorSecrets"], Some("2025-01-15T00:00:00Z")),
                app("NoTags", "app-2", &[], None)
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphClient::new(&settings(&server, OutputFormat::Text)).unwrap();
    let apps = client.list_applications().await.unwrap();

    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0].display_name.as_deref(), Some("MyApp1"));
    assert_eq!(apps[0].tags, vec!["MonitorSecrets".to_string()]);
    assert_eq!(apps[1].password_credentials[0].end_date_time, None);
}

#[tokio::test]
async fn test_follows_next_link() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .and(query_param("$select", SELECT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@odata.nextLink": format!("{}/v1.0/applications?$skiptoken=page2", server.uri()),
            "value": [app("First", "app-1", &["MonitorSecrets"], None)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .and(query_param("$skiptoken", "page2"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [app("Second", "app-2", &["MonitorSecrets"], None)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphClient::new(&settings(&server, OutputFormat::Text)).unwrap();
    let apps = client.list_applications().await.unwrap();

    let names: Vec<_> = apps.iter().filter_map(|a| a.display_name.as_deref()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_endless_next_links_are_cut_off() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .and(query_param("$select", SELECT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@odata.nextLink": format!("{}/v1.0/applications?$select={SELECT}", server.uri()),
            "value": []
        })))
        .expect(1000)
        .mount(&server)
        .await;

    let client = GraphClient::new(&settings(&server, OutputFormat::Text)).unwrap();
    let err = client.list_applications().await.unwrap_err();

    assert!(matches!(err, DirectoryError::TooManyPages(1000)));
    assert_eq!(
        err.to_string(),
        "failed to get applications: listing exceeded 1000 pages"
    );
}

#[tokio::test]
async fn test_next_link_to_another_host_is_not_followed() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@odata.nextLink": "https://other.example/v1.0/applications?$skiptoken=x",
            "value": [app("First", "app-1", &["MonitorSecrets"], None)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphClient::new(&settings(&server, OutputFormat::Text)).unwrap();
    let err = client.list_applications().await.unwrap_err();

    assert!(matches!(err, DirectoryError::ForeignNextLink(_)));
    assert_eq!(
        err.to_string(),
        "failed to get applications: refusing to follow next link to another host: \
         https://other.example/v1.0/applications?$skiptoken=x"
    );
}

#[tokio::test]
async fn test_rejected_credentials_surface_as_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{TENANT}/oauth2/v2.0/token")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "AADSTS7000215: Invalid client secret provided.\r\nTrace ID: 00000000"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = GraphClient::new(&settings(&server, OutputFormat::Text)).unwrap();
    let err = client.list_applications().await.unwrap_err();

    match err {
        DirectoryError::Authentication { status, ref message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "AADSTS7000215: Invalid client secret provided.");
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_listing_failure_carries_graph_message() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": "Authorization_RequestDenied",
                "message": "Insufficient privileges to complete the operation."
            }
        })))
        .mount(&server)
        .await;

    let client = GraphClient::new(&settings(&server, OutputFormat::Text)).unwrap();
    let err = client.list_applications().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "failed to get applications (403): Authorization_RequestDenied: Insufficient privileges to complete the operation."
    );
}

#[tokio::test]
async fn test_end_to_end_json_report() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                app("MyApp1", "cf6d6be9-0000-0000-0000-000000000001", &["MonitorSecrets"], Some("2025-01-15T00:00:00Z")),
                app("Untagged", "cf6d6be9-0000-0000-0000-000000000002", &["Other"], Some("2024-12-23T00:00:00Z")),
                app("FarFuture", "cf6d6be9-0000-0000-0000-000000000003", &["MonitorSecrets"], Some("2026-01-01T00:00:00Z")),
                app("NoExpiry", "cf6d6be9-0000-0000-0000-000000000004", &["MonitorSecrets"], None)
            ]
        })))
        .mount(&server)
        .await;

    let ctx = AppContext::builder()
        .with_settings(settings(&server, OutputFormat::Json))
        .with_clock(&FixedClock::new(
            Utc.with_ymd_and_hms(2024, 12, 22, 0, 0, 0).unwrap(),
        ))
        .build()
        .unwrap();
    let monitor = SecretMonitor::new(GraphClient::new(ctx.settings()).unwrap());

    let output = monitor.run(&ctx).await.unwrap();
    let report: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(
        report["results"],
        json!([{
            "application_name": "MyApp1",
            "application_id": "cf6d6be9-0000-0000-0000-000000000001",
            "secret_id": "cf6d6be9-0000-0000-0000-000000000001-key",
            "expiry_date": "2025-01-15",
            "days_to_expiry": 24
        }])
    );
    assert_eq!(report["execution_info"]["timestamp"], "2024-12-22T00:00:00Z");
    assert_eq!(report["execution_info"]["config"]["format"], "json");
    assert!(!output.contains("monitor-secret"));
}

#[tokio::test]
async fn test_end_to_end_empty_text_report() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .mount(&server)
        .await;

    let ctx = AppContext::builder()
        .with_settings(settings(&server, OutputFormat::Text))
        .with_clock(&FixedClock::new(
            Utc.with_ymd_and_hms(2024, 12, 22, 0, 0, 0).unwrap(),
        ))
        .build()
        .unwrap();
    let monitor = SecretMonitor::new(GraphClient::new(ctx.settings()).unwrap());

    let output = monitor.run(&ctx).await.unwrap();

    assert!(output.ends_with("\nNo expiring secrets found.\n"));
}

#[tokio::test]
async fn test_unreachable_directory_fails_run() {
    let server = MockServer::start().await;
    let mut settings = settings(&server, OutputFormat::Text);
    settings.authority_host = "http://127.0.0.1:1".into();

    let ctx = AppContext::builder().with_settings(settings).build().unwrap();
    let monitor = SecretMonitor::new(GraphClient::new(ctx.settings()).unwrap());

    let err = monitor.run(&ctx).await.unwrap_err();

    assert!(matches!(err, Error::Fetch(DirectoryError::TokenRequest(_))));
    assert!(err.to_string().starts_with("failed to check secrets: credential error:"));
}
