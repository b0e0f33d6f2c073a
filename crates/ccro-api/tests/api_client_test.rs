#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ccro_api::{ApiClient, BoxDraft, EntityId, Error, LocationProfileDraft, NewActivityLog};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

/// A client pointed at a port nothing listens on.
fn unreachable_client() -> ApiClient {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base_url = Url::parse(&format!("http://{addr}/api")).unwrap();
    ApiClient::with_client(reqwest::Client::new(), base_url)
}

// ── Boxes ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_boxes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/boxes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "code": "B-001", "description": "Marriage records 1990", "locationId": 4 },
            { "id": 2, "code": "B-002" },
        ])))
        .mount(&server)
        .await;

    let boxes = client.list_boxes().await.unwrap();

    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].code, "B-001");
    assert_eq!(boxes[0].location_id, Some(EntityId::Number(4)));
    assert_eq!(boxes[1].description, None);
}

#[tokio::test]
async fn test_get_box() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/boxes/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "7", "code": "B7" })))
        .mount(&server)
        .await;

    let b = client.get_box(&EntityId::from(7)).await.unwrap();
    assert_eq!(b.id, EntityId::from("7"));
    assert_eq!(b.code, "B7");
}

#[tokio::test]
async fn test_create_box_sends_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/boxes"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "code": "B1", "description": "Deeds" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": "1", "code": "B1", "description": "Deeds" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = BoxDraft {
        description: Some("Deeds".into()),
        ..BoxDraft::new("B1")
    };
    let created = client.create_box(&draft).await.unwrap();

    assert_eq!(created.id, EntityId::from("1"));
    assert_eq!(created.description.as_deref(), Some("Deeds"));
}

#[tokio::test]
async fn test_update_box_uses_put_on_id() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/boxes/1"))
        .and(body_json(json!({ "id": "1", "code": "B1-renamed" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "1", "code": "B1-renamed" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let edited = serde_json::from_value(json!({ "id": "1", "code": "B1-renamed" })).unwrap();
    let updated = client
        .update_box(&EntityId::from("1"), &edited)
        .await
        .unwrap();
    assert_eq!(updated.code, "B1-renamed");
}

#[tokio::test]
async fn test_delete_box_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/boxes/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_box(&EntityId::from("1")).await.unwrap();
}

// ── Location profiles ───────────────────────────────────────────────

#[tokio::test]
async fn test_get_active_location_profile() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/location-profiles/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "Main vault", "isActive": true, "rows": 12
        })))
        .mount(&server)
        .await;

    let active = client.get_active_location_profile().await.unwrap().unwrap();
    assert_eq!(active.name, "Main vault");
    assert!(active.is_active);
    assert_eq!(active.settings.get("rows"), Some(&json!(12)));
}

#[tokio::test]
async fn test_get_active_location_profile_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/location-profiles/active"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    assert!(client.get_active_location_profile().await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_location_profile_posts_draft() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/location-profiles"))
        .and(body_json(json!({ "id": 3, "name": "Annex" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 3, "name": "Annex", "isActive": false })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = LocationProfileDraft {
        id: Some(EntityId::from(3)),
        name: "Annex".into(),
        ..LocationProfileDraft::default()
    };
    let saved = client.save_location_profile(&draft).await.unwrap();
    assert_eq!(saved.id, EntityId::from(3));
}

#[tokio::test]
async fn test_set_active_location_profile() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/location-profiles/3/active"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_active_location_profile(&EntityId::from(3))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_location_profile() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/location-profiles/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_location_profile(&EntityId::from(3))
        .await
        .unwrap();
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "archivist", "password": "hunter2" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "username": "archivist" })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let user = client.login("archivist", &secret).await.unwrap();
    assert_eq!(user.id, EntityId::from(5));
    assert_eq!(user.username, "archivist");
}

#[tokio::test]
async fn test_login_failure_carries_status_and_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("archivist", &secret).await;

    match result {
        Err(Error::Http { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_user() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/user/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 5, "username": "archivist", "role": "admin" })),
        )
        .mount(&server)
        .await;

    let user = client.get_user(&EntityId::from(5)).await.unwrap();
    assert_eq!(user.extra.get("role"), Some(&json!("admin")));
}

// ── Activity logs ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_activity_logs_passes_limit() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/activity-logs"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 10,
            "userId": 5,
            "username": "archivist",
            "type": "SEARCH",
            "details": "found box B1",
            "searchCode": "B1",
            "timestamp": "2024-06-15T10:30:00Z"
        }])))
        .mount(&server)
        .await;

    let logs = client.list_activity_logs(100).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, "SEARCH");
    assert_eq!(logs[0].search_code.as_deref(), Some("B1"));
}

#[tokio::test]
async fn test_create_activity_log() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/activity-logs"))
        .and(body_json(json!({
            "userId": null,
            "username": null,
            "type": "SEARCH",
            "details": "found box B1",
            "searchCode": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11,
            "userId": null,
            "username": null,
            "type": "SEARCH",
            "details": "found box B1",
            "searchCode": null,
            "timestamp": "2024-06-15T10:31:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = NewActivityLog {
        user_id: None,
        username: None,
        kind: "SEARCH".into(),
        details: "found box B1".into(),
        search_code: None,
    };
    let created = client.create_activity_log(&entry).await.unwrap();
    assert_eq!(created.id, EntityId::from(11));
}

#[tokio::test]
async fn test_clear_activity_logs() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/activity-logs"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.clear_activity_logs().await.unwrap();
}

// ── Error classification ────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_falls_back_to_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/boxes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .mount(&server)
        .await;

    let err = client.list_boxes().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP 500: database is locked");
}

#[tokio::test]
async fn test_http_error_reads_error_field() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/boxes/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Box not found" })))
        .mount(&server)
        .await;

    let err = client.delete_box(&EntityId::from(9)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "HTTP 404: Box not found");
}

#[tokio::test]
async fn test_http_error_without_body_uses_reason() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/boxes"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.list_boxes().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn test_deserialization_error_keeps_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/boxes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = client.list_boxes().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>proxy error</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client = unreachable_client();

    let err = client.list_boxes().await.unwrap_err();
    assert!(err.is_network(), "expected Network error, got: {err:?}");
    assert_eq!(err.status(), None);
}
