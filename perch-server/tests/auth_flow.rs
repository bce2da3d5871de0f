//! Credential guard integration tests
//!
//! Drives the real router in-process against a tempdir-backed store.

use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use perch_server::{Config, ServerState};
use serde_json::json;

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    config.jwt.secret = "integration-test-secret-0123456789abcdef".to_string();

    let state = ServerState::initialize(&config).await;
    state.http.initialize(state.clone());
    (state, tmp)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn register_body(email: &str, username: &str, password: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": email,
        "name": "Test User",
        "age": 30,
        "password": password,
    })
}

/// "token=..." pair from the response's Set-Cookie header
fn session_cookie(response: &http::Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_json(response: http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn register_then_login() {
    let (state, _tmp) = test_state().await;

    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/register",
            register_body("ada@example.com", "ada", "pw1"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    assert!(cookie.starts_with("token="));
    assert!(cookie.len() > "token=".len());

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["profile_pic"], "default.webp");
    assert!(body["user"].get("password_hash").is_none());

    // Same credentials authenticate
    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "ada@example.com", "password": "pw1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/profile");
    assert!(session_cookie(&response).starts_with("token="));
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let (state, _tmp) = test_state().await;

    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/register",
            register_body("dup@example.com", "first", "pw1"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/register",
            register_body("dup@example.com", "second", "pw2"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User already exists");

    // First record is unchanged: its credentials still authenticate
    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "dup@example.com", "password": "pw1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // And the second registration created no account
    let second = state.users().find_by_username("second").await.unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn wrong_password_rejected() {
    let (state, _tmp) = test_state().await;

    state
        .http
        .oneshot(json_request(
            "POST",
            "/register",
            register_body("ada@example.com", "ada", "pw1"),
        ))
        .await
        .unwrap();

    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "ada@example.com", "password": "nope"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown email gets the same response shape
    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/login",
            json!({"email": "ghost@example.com", "password": "pw1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_token_redirects_to_login() {
    let (state, _tmp) = test_state().await;

    let response = state
        .http
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    // No protected data in the redirect
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let (state, _tmp) = test_state().await;

    for bad_cookie in ["token=garbage", "token=aaaa.bbbb.cccc"] {
        let response = state
            .http
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/profile")
                    .header(header::COOKIE, bad_cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert!(body.get("user").is_none());
    }
}

#[tokio::test]
async fn profile_round_trip() {
    let (state, _tmp) = test_state().await;

    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/register",
            register_body("ada@example.com", "ada", "pw1"),
        ))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = state
        .http
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/profile")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "ada");
    assert_eq!(body["posts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn logout_clears_cookie() {
    let (state, _tmp) = test_state().await;

    let response = state
        .http
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
    assert_eq!(session_cookie(&response), "token=");
}
