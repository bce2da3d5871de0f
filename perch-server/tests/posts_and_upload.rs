//! Post editing and profile picture upload flows

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

fn json_request(method: &str, uri: &str, cookie: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie.to_string())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie.to_string())
        .body(Body::empty())
        .unwrap()
}

async fn register(state: &ServerState, email: &str, username: &str) -> String {
    let response = state
        .http
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "username": username,
                        "email": email,
                        "name": "Test User",
                        "age": 30,
                        "password": "pw1",
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
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

async fn first_post_id(state: &ServerState, cookie: &str) -> String {
    let response = state
        .http
        .oneshot(get_with_cookie("/profile", cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    body["posts"][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn edit_and_update_post() {
    let (state, _tmp) = test_state().await;
    let cookie = register(&state, "ada@example.com", "ada").await;

    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/post",
            &cookie,
            json!({"content": "first draft"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let post_id = first_post_id(&state, &cookie).await;

    // Fetch for editing: post plus populated author
    let response = state
        .http
        .oneshot(get_with_cookie(&format!("/edit/{}", post_id), &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["post"]["content"], "first draft");
    assert_eq!(body["author"]["username"], "ada");

    // Overwrite content
    let response = state
        .http
        .oneshot(json_request(
            "POST",
            &format!("/update/{}", post_id),
            &cookie,
            json!({"content": "final text"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = state
        .http
        .oneshot(get_with_cookie(&format!("/edit/{}", post_id), &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["post"]["content"], "final text");
}

#[tokio::test]
async fn update_missing_post_is_not_found() {
    let (state, _tmp) = test_state().await;
    let cookie = register(&state, "ada@example.com", "ada").await;

    let response = state
        .http
        .oneshot(json_request(
            "POST",
            "/update/post:doesnotexist",
            &cookie,
            json!({"content": "anything"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

fn multipart_body(boundary: &str, field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

#[tokio::test]
async fn upload_sets_profile_picture() {
    let (state, _tmp) = test_state().await;
    let cookie = register(&state, "ada@example.com", "ada").await;

    let boundary = "perch-test-boundary";
    let image_data = b"\x89PNG\r\n\x1a\nfakeimagebytes";
    let response = state
        .http
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .header(header::COOKIE, cookie.clone())
                .body(Body::from(multipart_body(
                    boundary,
                    "image",
                    "me.png",
                    image_data,
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Profile now points at the stored file
    let response = state
        .http
        .oneshot(get_with_cookie("/profile", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    let profile_pic = body["user"]["profile_pic"].as_str().unwrap().to_string();
    assert_ne!(profile_pic, "default.webp");
    assert!(profile_pic.ends_with(".png"));

    // And the file is served back, publicly
    let response = state
        .http
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/uploads/{}", profile_pic))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], image_data);
}

#[tokio::test]
async fn upload_without_file_is_bad_request() {
    let (state, _tmp) = test_state().await;
    let cookie = register(&state, "ada@example.com", "ada").await;

    let boundary = "perch-test-boundary";
    // A multipart body with no "image" field at all
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n");
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    let response = state
        .http
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .header(header::COOKIE, cookie)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
