use super::*;

use std::sync::atomic::{AtomicU32, Ordering};

use serde_json::json;

use crate::http::{HttpError, MockHttpClient};
use crate::session::{Session, SessionStore};
use crate::storage::MemoryStore;

const BASE: &str = "http://localhost:3000";

// =========================================================
// Helpers
// =========================================================

fn make_user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: "admin".to_string(),
        active: true,
        last_login: None,
    }
}

/// Client over the mock transport and an in-memory session store. The
/// counter ticks every time the unauthorized hook fires.
fn make_client(authenticated: bool) -> (ApiClient<MockHttpClient, MemoryStore>, Arc<AtomicU32>) {
    let store = SessionStore::new(MemoryStore::new());
    if authenticated {
        store.save(&Session {
            token: "tok-1".to_string(),
            user: make_user(1, "Ada"),
        });
    }

    let hook_hits = Arc::new(AtomicU32::new(0));
    let hits = Arc::clone(&hook_hits);
    let client = ApiClient::new(
        MockHttpClient::new(),
        BASE,
        store,
        Arc::new(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        }),
    );
    (client, hook_hits)
}

// =========================================================
// Authorization header
// =========================================================

#[tokio::test]
async fn test_bearer_token_injected_when_authenticated() {
    let (client, _) = make_client(true);
    client
        .http
        .mock_response(&format!("{}/roles", BASE), 200, json!({"roles": {}}));

    client.list_roles().await.unwrap();

    let request = client.http.last_request().unwrap();
    assert_eq!(
        request.headers.get(HEADER_AUTHORIZATION).map(String::as_str),
        Some("Bearer tok-1")
    );
}

#[tokio::test]
async fn test_no_auth_header_without_session() {
    let (client, _) = make_client(false);
    client
        .http
        .mock_response(&format!("{}/roles", BASE), 200, json!({"roles": {}}));

    client.list_roles().await.unwrap();

    let request = client.http.last_request().unwrap();
    assert!(!request.headers.contains_key(HEADER_AUTHORIZATION));
}

// =========================================================
// Payload and error normalization
// =========================================================

#[tokio::test]
async fn test_success_payload_decoded() {
    let (client, _) = make_client(true);
    let user = make_user(7, "Grace");
    client.http.mock_response(
        &format!("{}/users/7", BASE),
        200,
        serde_json::to_value(&user).unwrap(),
    );

    let fetched = client.get_user(7).await.unwrap();

    assert_eq!(fetched, user);
}

#[tokio::test]
async fn test_failure_uses_envelope_message() {
    let (client, _) = make_client(true);
    client.http.mock_response(
        &format!("{}/users", BASE),
        409,
        json!({"errors": {"message": "Email already in use"}}),
    );

    let request = CreateUserRequest {
        name: "Dup".to_string(),
        email: "dup@example.com".to_string(),
        password: "secret1".to_string(),
        role: "user".to_string(),
        active: true,
    };
    let err = client.create_user(&request).await.unwrap_err();

    assert_eq!(err, ApiError::http(409, "Email already in use"));
}

#[tokio::test]
async fn test_failure_without_envelope_falls_back() {
    let (client, _) = make_client(true);
    client.http.mock_raw_response(
        &format!("{}/roles", BASE),
        HttpResponse::new(500, b"<html>Internal Server Error</html>".to_vec()),
    );

    let err = client.list_roles().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), REQUEST_FAILED);
}

#[tokio::test]
async fn test_transport_failure_maps_to_network_error() {
    struct FailingClient;

    #[async_trait::async_trait(?Send)]
    impl HttpClient for FailingClient {
        async fn send(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            Err(HttpError::new("connection refused"))
        }
    }

    let client = ApiClient::new(
        FailingClient,
        BASE,
        SessionStore::new(MemoryStore::new()),
        Arc::new(|| {}),
    );

    let err = client.list_roles().await.unwrap_err();

    assert_eq!(err, ApiError::network("connection refused"));
    assert!(!err.is_unauthorized());
}

// =========================================================
// 401 invalidation
// =========================================================

#[tokio::test]
async fn test_unauthorized_clears_session_and_fires_hook() {
    let (client, hook_hits) = make_client(true);
    client.http.mock_response(
        &format!("{}/users", BASE),
        401,
        json!({"errors": {"message": "Token expired"}}),
    );

    let err = client.list_users(&ListQuery::default()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Token expired");
    // the stored session is gone and the redirect hook ran once
    assert_eq!(client.session.token(), None);
    assert_eq!(client.session.user(), None);
    assert_eq!(hook_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_anonymous_unauthorized_is_a_plain_failure() {
    let (client, hook_hits) = make_client(false);
    client.http.mock_response(
        &format!("{}/auth/login", BASE),
        401,
        json!({"errors": {"message": "Invalid credentials"}}),
    );

    let request = LoginRequest {
        email: "ada@example.com".to_string(),
        password: "wrong".to_string(),
    };
    let err = client.login(&request).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(hook_hits.load(Ordering::SeqCst), 0);
}

// =========================================================
// Login round trip
// =========================================================

#[tokio::test]
async fn test_login_round_trip_caches_the_user() {
    let (client, _) = make_client(false);
    let user = make_user(3, "Ada");
    client.http.mock_response(
        &format!("{}/auth/login", BASE),
        200,
        json!({"token": "fresh-token", "user": serde_json::to_value(&user).unwrap()}),
    );

    let request = LoginRequest {
        email: "ada@example.com".to_string(),
        password: "secret1".to_string(),
    };
    let response = client.login(&request).await.unwrap();
    client.session.save(&Session::from(response));

    // a profile read now comes from the cache, not the network
    assert_eq!(client.session.user(), Some(user));
    assert_eq!(client.session.token().as_deref(), Some("fresh-token"));
    assert_eq!(client.http.request_count(), 1);
}

// =========================================================
// Endpoint shapes
// =========================================================

#[tokio::test]
async fn test_list_users_sends_canonical_params() {
    let (client, _) = make_client(true);
    client.http.mock_response(
        &format!("{}/users", BASE),
        200,
        json!({"users": [], "totalPages": 0, "totalUsers": 0}),
    );

    let mut query = ListQuery::default();
    query.search = "ada".to_string();
    query.filters.insert("active".to_string(), "true".to_string());
    client.list_users(&query).await.unwrap();

    let request = client.http.last_request().unwrap();
    assert_eq!(request.url, format!("{}/users", BASE));
    assert_eq!(
        request.query,
        vec![
            ("page".to_string(), "1".to_string()),
            ("pageSize".to_string(), "10".to_string()),
            ("sortBy".to_string(), "name".to_string()),
            ("sortOrder".to_string(), "asc".to_string()),
            ("search".to_string(), "ada".to_string()),
            ("active".to_string(), "true".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_delete_user_hits_resource_path() {
    let (client, _) = make_client(true);
    client
        .http
        .mock_response(&format!("{}/users/3", BASE), 200, json!({"deleted": true}));

    client.delete_user(3).await.unwrap();

    let request = client.http.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url, format!("{}/users/3", BASE));
}

#[tokio::test]
async fn test_set_user_password_patches_with_body() {
    let (client, _) = make_client(true);
    client
        .http
        .mock_response(&format!("{}/users/9/password", BASE), 200, json!({}));

    let request = SetPasswordRequest {
        password: "next-secret".to_string(),
    };
    client.set_user_password(9, &request).await.unwrap();

    let sent = client.http.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Patch);
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"password": "next-secret"}));
}

#[tokio::test]
async fn test_change_password_posts_camel_case_body() {
    let (client, _) = make_client(true);
    client
        .http
        .mock_response(&format!("{}/profile/change-password", BASE), 200, json!({}));

    let request = ChangePasswordRequest {
        current_password: "old".to_string(),
        new_password: "new-secret".to_string(),
    };
    client.change_password(&request).await.unwrap();

    let sent = client.http.last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({"currentPassword": "old", "newPassword": "new-secret"})
    );
    assert_eq!(
        sent.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

// =========================================================
// Export
// =========================================================

#[tokio::test]
async fn test_export_downloads_binary_with_filename() {
    let (client, _) = make_client(true);
    let spreadsheet = vec![0x50, 0x4b, 0x03, 0x04, 0x00];
    client.http.mock_raw_response(
        &format!("{}/users", BASE),
        HttpResponse::new(200, spreadsheet.clone())
            .with_header(
                "Content-Type",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            )
            .with_header("Content-Disposition", "attachment; filename=\"team users.xlsx\""),
    );

    let download = client
        .export_users(&ListQuery::default(), "xlsx")
        .await
        .unwrap();

    assert_eq!(download.filename, "team users.xlsx");
    assert_eq!(download.bytes, spreadsheet);
    assert!(download.content_type.contains("spreadsheetml"));

    let request = client.http.last_request().unwrap();
    assert!(request
        .query
        .contains(&("export".to_string(), "true".to_string())));
    assert!(request
        .query
        .contains(&("format".to_string(), "xlsx".to_string())));
}

#[tokio::test]
async fn test_export_without_disposition_uses_default_name() {
    let (client, _) = make_client(true);
    client.http.mock_raw_response(
        &format!("{}/users", BASE),
        HttpResponse::new(200, vec![1, 2, 3]),
    );

    let download = client
        .export_users(&ListQuery::default(), "xlsx")
        .await
        .unwrap();

    assert_eq!(download.filename, "users.xlsx");
    assert_eq!(download.content_type, "application/octet-stream");
}

#[test]
fn test_parse_filename_variants() {
    assert_eq!(
        parse_filename("attachment; filename=\"users.xlsx\""),
        Some("users.xlsx".to_string())
    );
    assert_eq!(
        parse_filename("attachment; filename=users.csv"),
        Some("users.csv".to_string())
    );
    assert_eq!(
        parse_filename("attachment; filename=\"a.xlsx\"; size=12"),
        Some("a.xlsx".to_string())
    );
    assert_eq!(parse_filename("attachment"), None);
    assert_eq!(parse_filename("attachment; filename=\"\""), None);
}
