mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{api_config, temp_png};
use placeshare::pages::{AuthMode, AuthPage, PageError};
use placeshare::upload::Upload;
use tempfile::TempDir;

fn page_for(mock: &MockBackend) -> AuthPage {
    AuthPage::new(api_config(&mock.base_url())).unwrap()
}

#[tokio::test]
async fn test_login_posts_json_and_returns_session() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"userId": "u1", "token": "t1"}"#))
        .await;

    let mut page = page_for(&mock);
    page.input("email", "  max@test.com ").unwrap();
    page.input("password", "secret1").unwrap();
    assert!(page.form().is_valid());

    let session = page.submit().await.unwrap();
    assert_eq!(session.user_id, "u1");
    assert_eq!(session.token.expose(), "t1");
    assert!(!page.request().is_loading());

    let captured = mock.captured_requests().await;
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].path, "/api/users/login");
    assert_eq!(captured[0].json()["password"], "secret1");
}

#[tokio::test]
async fn test_login_rejected_shows_server_message() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(
        403,
        "Invalid credentials, could not log you in.",
    ))
    .await;

    let mut page = page_for(&mock);
    page.input("email", "max@test.com").unwrap();
    page.input("password", "wrong-password").unwrap();

    let err = page.submit().await.unwrap_err();
    assert!(matches!(err, PageError::Request(_)));
    assert_eq!(
        page.request().error_message().as_deref(),
        Some("Invalid credentials, could not log you in.")
    );

    page.clear_error();
    assert!(page.request().error_message().is_none());
}

#[tokio::test]
async fn test_invalid_login_never_reaches_server() {
    let mock = MockBackend::start().await;

    let mut page = page_for(&mock);
    page.input("email", "not-an-email").unwrap();
    page.input("password", "secret1").unwrap();

    assert!(matches!(page.submit().await, Err(PageError::InvalidForm)));
    assert!(mock.captured_requests().await.is_empty());
}

#[tokio::test]
async fn test_signup_sends_multipart_with_image() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"userId": "u2", "token": "t2"}"#))
        .await;

    let dir = TempDir::new().unwrap();
    let image = Upload::from_path(&temp_png(&dir, "me.png")).unwrap();

    let mut page = page_for(&mock);
    page.switch_mode();
    assert_eq!(page.mode(), AuthMode::Signup);

    page.input("name", "Max").unwrap();
    page.input("email", "max@test.com").unwrap();
    page.input("password", "secret1").unwrap();
    assert!(!page.form().is_valid());
    page.input("image", image).unwrap();
    assert!(page.form().is_valid());

    let session = page.submit().await.unwrap();
    assert_eq!(session.user_id, "u2");

    let captured = mock.captured_requests().await;
    assert_eq!(captured[0].path, "/api/users/signup");
    let content_type = captured[0].header("content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = captured[0].body_text();
    assert!(body.contains(r#"name="email""#));
    assert!(body.contains("max@test.com"));
    assert!(body.contains(r#"name="name""#));
    assert!(body.contains(r#"filename="me.png""#));
    assert!(body.contains("image/png"));

    let email_at = body.find(r#"name="email""#).unwrap();
    let image_at = body.find(r#"name="image""#).unwrap();
    assert!(email_at < image_at);
}

#[tokio::test]
async fn test_mode_round_trip_keeps_credentials() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"userId": "u1", "token": "t1"}"#))
        .await;

    let mut page = page_for(&mock);
    page.input("email", "max@test.com").unwrap();
    page.input("password", "secret1").unwrap();

    page.switch_mode();
    page.input("name", "Max").unwrap();
    page.switch_mode();

    assert_eq!(page.mode(), AuthMode::Login);
    assert!(page.form().is_valid());
    page.submit().await.unwrap();

    let captured = mock.captured_requests().await;
    assert_eq!(captured[0].path, "/api/users/login");
    assert_eq!(captured[0].json()["email"], "max@test.com");
}
