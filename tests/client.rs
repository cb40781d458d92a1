//! End-to-end client tests: login, token caching, and the typed task
//! endpoints against a mock server.

use danella_sdk::{DanellaClient, DanellaConfig, DanellaError, TaskCreateDto, TokenCache};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> DanellaConfig {
    DanellaConfig::new("test-key", 7, 9, "tester")
        .with_base_url(server.uri())
        .with_auth_url(format!("{}/auth/token", server.uri()))
}

fn client_for(server: &MockServer, dir: &tempfile::TempDir) -> DanellaClient {
    let cache = TokenCache::at(dir.path().join("token.json"));
    DanellaClient::with_token_cache(config_for(server), cache).unwrap()
}

async fn mount_auth(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(body_json(json!({
            "apiKey": "test-key",
            "userID": 7,
            "employeeID": 9,
            "name": "tester",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_stores_token() {
    let server = MockServer::start().await;
    mount_auth(&server, "abc123").await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    assert!(!client.is_authenticated());

    let response = client.auth().login().await.unwrap();
    assert_eq!(response.access_token, "abc123");
    assert_eq!(response.expires_in, 3600);
    assert!(client.is_authenticated());
    assert_eq!(client.token(), Some("abc123".to_string()));
}

#[tokio::test]
async fn login_failure_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad api key"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    let err = client.auth().login().await.unwrap_err();
    match err {
        DanellaError::Authentication(msg) => {
            assert!(msg.contains("403"));
            assert!(msg.contains("bad api key"));
        }
        other => panic!("expected Authentication, got {other:?}"),
    }
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn login_cached_reuses_token_across_clients() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "cached-me",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();

    let first = client_for(&server, &dir);
    assert_eq!(first.auth().login_cached().await.unwrap(), "cached-me");

    // A second client sharing the cache file never hits the auth endpoint.
    let second = client_for(&server, &dir);
    assert_eq!(second.auth().login_cached().await.unwrap(), "cached-me");
    assert!(second.is_authenticated());

    server.verify().await;
}

#[tokio::test]
async fn logout_clears_token() {
    let server = MockServer::start().await;
    mount_auth(&server, "abc123").await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    client.auth().login().await.unwrap();
    assert!(client.is_authenticated());

    client.auth().logout();
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn get_task_by_id_deserializes() {
    let server = MockServer::start().await;
    mount_auth(&server, "abc123").await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/6394"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "taskID": 6394,
            "taskCode": "T-6394",
            "jobID": "JOB-17",
            "subProjectID": 32,
            "subProjectName": "North Ring",
            "endDate": null,
            "amount": 1250.5,
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    client.auth().login().await.unwrap();

    let task = client.tasks().by_id(6394).await.unwrap();
    assert_eq!(task.task_id, 6394);
    assert_eq!(task.task_code, "T-6394");
    assert_eq!(task.sub_project_name.as_deref(), Some("North Ring"));
    assert_eq!(task.end_date, None);
    assert_eq!(task.amount, Some(1250.5));
}

#[tokio::test]
async fn get_tasks_by_sub_project_returns_list() {
    let server = MockServer::start().await;
    mount_auth(&server, "abc123").await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/by-subproject/32"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"taskID": 1, "taskCode": "T-1"},
            {"taskID": 2, "taskCode": "T-2"},
        ])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    client.auth().login().await.unwrap();

    let tasks = client.tasks().by_sub_project(32).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].task_code, "T-2");
}

#[tokio::test]
async fn get_project_secondary_fields() {
    let server = MockServer::start().await;
    mount_auth(&server, "abc123").await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/project-secondary-fields/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "projectSecondaryFieldID": 7,
            "projectID": 1,
            "fieldDefinitionID": 3,
            "fieldName": "Region",
            "deleted": 0,
            "createDate": "2025-01-01T00:00:00Z",
            "userID": 12,
        }])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    client.auth().login().await.unwrap();

    let fields = client.tasks().project_secondary_fields(1).await.unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_name, "Region");
    assert_eq!(fields[0].project_id, 1);
}

#[tokio::test]
async fn update_task_sends_wire_body_and_returns_upsert() {
    let server = MockServer::start().await;
    mount_auth(&server, "abc123").await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks"))
        .and(body_json(json!({
            "subProjectID": 41,
            "verifierKeyID": "VER-001",
            "jobID": "TEST-001",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "taskID": 7001,
            "taskCode": "T-7001",
            "subProjectID": 41,
            "jobID": "TEST-001",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    client.auth().login().await.unwrap();

    let task = client
        .tasks()
        .update(&TaskCreateDto {
            sub_project_id: Some(41),
            verifier_key_id: Some("VER-001".to_string()),
            job_id: Some("TEST-001".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(task.task_id, 7001);
    assert_eq!(task.sub_project_id, 41);
    server.verify().await;
}
