//! Integration tests for the login/logout flow.

mod helpers;

use helpers::{TEST_EMAIL, TEST_PASSWORD, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_login_success_sets_session_cookie() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.envelope(200, "OK"), "Login success!!");

    let cookie = response.set_cookie.as_deref().expect("missing Set-Cookie");
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(!response.session_token().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_normalizes_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": "  TEST@Gmail.com ", "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.envelope(200, "OK"), "Login success!!");

    let token = response.session_token().unwrap();
    let me = app.request("GET", "/api/auth", None, Some(&token)).await;
    assert_eq!(me.envelope(200, "OK"), TEST_EMAIL);
}

#[tokio::test]
async fn test_login_malformed_payload() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": "invalid_email", "password": "$%£&" })),
            None,
        )
        .await;

    let data = response.envelope(422, "UNPROCESSABLE_ENTITY");
    let errors = data.as_array().expect("data should be a list");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["path"], "email");
    assert_eq!(errors[1]["path"], "password");
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/auth", Some(json!({})), None).await;

    let data = response.envelope(422, "UNPROCESSABLE_ENTITY");
    assert_eq!(
        data,
        &json!([
            { "path": "email", "message": "Email is required" },
            { "path": "password", "message": "Password is required" },
        ])
    );
}

#[tokio::test]
async fn test_login_unreadable_body() {
    let app = TestApp::new();

    let response = app
        .raw_request("POST", "/api/auth", "{not json", None)
        .await;

    let data = response.envelope(422, "UNPROCESSABLE_ENTITY");
    assert_eq!(data[0]["path"], "body");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": TEST_EMAIL, "password": "wrong" })),
            None,
        )
        .await;

    let data = response.envelope(422, "UNPROCESSABLE_ENTITY");
    assert_eq!(
        data,
        &json!([{ "path": "password", "message": "Password doesn't match" }])
    );
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn test_login_unknown_account() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": "notfound@gmail.com", "password": TEST_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.envelope(404, "NOT_FOUND"), "User Not Found");
}

#[tokio::test]
async fn test_login_after_account_removed() {
    let app = TestApp::new();
    assert!(app.store.remove(TEST_EMAIL));

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.envelope(404, "NOT_FOUND"), "User Not Found");
}

#[tokio::test]
async fn test_provisioned_account_can_log_in() {
    let app = TestApp::new();
    app.accounts
        .create("Ops@Tally.dev", "opspass1")
        .await
        .expect("Failed to provision account");

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": "ops@tally.dev", "password": "opspass1" })),
            None,
        )
        .await;
    assert_eq!(response.envelope(200, "OK"), "Login success!!");

    let token = response.session_token().unwrap();
    let me = app.request("GET", "/api/auth", None, Some(&token)).await;
    assert_eq!(me.envelope(200, "OK"), "ops@tally.dev");
}

#[tokio::test]
async fn test_reset_password_replaces_old_one() {
    let app = TestApp::new();
    app.accounts
        .reset_password(TEST_EMAIL, "newpass9")
        .await
        .expect("Failed to reset password");

    let old = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(
        old.envelope(422, "UNPROCESSABLE_ENTITY")[0]["message"],
        "Password doesn't match"
    );

    let new = app
        .request(
            "POST",
            "/api/auth",
            Some(json!({ "email": TEST_EMAIL, "password": "newpass9" })),
            None,
        )
        .await;
    assert_eq!(new.envelope(200, "OK"), "Login success!!");
}

#[tokio::test]
async fn test_logout_success_clears_cookie() {
    let app = TestApp::new();
    let token = app.login().await;

    let response = app.request("DELETE", "/api/auth", None, Some(&token)).await;

    assert_eq!(response.envelope(200, "OK"), "Logout success!!");
    let cookie = response.set_cookie.as_deref().expect("missing Set-Cookie");
    assert!(cookie.starts_with("jwt=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_without_cookie() {
    let app = TestApp::new();

    let response = app.request("DELETE", "/api/auth", None, None).await;

    assert_eq!(response.envelope(401, "UNAUTHORIZED"), "JWT token is null");
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn test_logout_with_invalid_token() {
    let app = TestApp::new();

    let response = app
        .request("DELETE", "/api/auth", None, Some("invalid_jwt"))
        .await;

    assert_eq!(response.envelope(401, "UNAUTHORIZED"), "Invalid JWT token");
}

#[tokio::test]
async fn test_logout_with_token_from_other_secret() {
    let app = TestApp::new();
    let foreign = tally_auth::TokenCodec::from_secret(b"someone-else")
        .unwrap()
        .encode(TEST_EMAIL, chrono::Utc::now(), chrono::Duration::hours(1))
        .unwrap();

    let response = app
        .request("DELETE", "/api/auth", None, Some(&foreign.token))
        .await;

    assert_eq!(response.envelope(401, "UNAUTHORIZED"), "Invalid JWT token");
}

#[tokio::test]
async fn test_revoked_token_cannot_be_reused() {
    let app = TestApp::new();
    let token = app.login().await;

    let first = app.request("DELETE", "/api/auth", None, Some(&token)).await;
    assert_eq!(first.envelope(200, "OK"), "Logout success!!");

    let second = app.request("DELETE", "/api/auth", None, Some(&token)).await;
    assert_eq!(second.envelope(401, "UNAUTHORIZED"), "Invalid JWT token");

    let me = app.request("GET", "/api/auth", None, Some(&token)).await;
    assert_eq!(me.envelope(401, "UNAUTHORIZED"), "Invalid JWT token");
}

#[tokio::test]
async fn test_logout_with_cleared_cookie() {
    let app = TestApp::stateless();
    let token = app.login().await;

    let first = app.request("DELETE", "/api/auth", None, Some(&token)).await;
    let cleared = first.session_token().expect("missing cleared cookie");
    assert!(cleared.is_empty());

    let second = app.request("DELETE", "/api/auth", None, Some(&cleared)).await;
    assert_eq!(second.envelope(401, "UNAUTHORIZED"), "JWT token is null");
}

#[tokio::test]
async fn test_stateless_logout_is_repeatable() {
    let app = TestApp::stateless();
    let token = app.login().await;

    for _ in 0..2 {
        let response = app.request("DELETE", "/api/auth", None, Some(&token)).await;
        assert_eq!(response.envelope(200, "OK"), "Logout success!!");
    }
}

#[tokio::test]
async fn test_current_session_requires_cookie() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth", None, None).await;

    assert_eq!(response.envelope(401, "UNAUTHORIZED"), "JWT token is null");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.envelope(200, "OK"), "OK");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/nope", None, None).await;

    assert_eq!(response.envelope(404, "NOT_FOUND"), "Not Found");
}
