//! Shared test helpers for integration tests.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use tally_api::AppState;
use tally_auth::{
    AccountProvisioner, MemoryTokenDenylist, PasswordHasher, SessionAuthenticator, TokenCodec,
};
use tally_core::config::AppConfig;
use tally_core::traits::PasswordVerifier;
use tally_database::MemoryCredentialStore;

/// Seeded account.
pub const TEST_EMAIL: &str = "test@gmail.com";
/// Password of the seeded account.
pub const TEST_PASSWORD: &str = "123pas";

/// Argon2 hash of [`TEST_PASSWORD`], computed once per test binary.
fn test_password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        PasswordHasher::new()
            .hash(TEST_PASSWORD)
            .expect("Failed to hash test password")
    })
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Credential store backing the router
    pub store: Arc<MemoryCredentialStore>,
    /// Provisions accounts into `store`
    pub accounts: AccountProvisioner,
}

impl TestApp {
    /// Create a test application with logout revocation enabled
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Create a test application that keeps no session state
    pub fn stateless() -> Self {
        Self::build(false)
    }

    fn build(revocation: bool) -> Self {
        let mut config = AppConfig::from_toml(
            r#"
            [auth]
            jwt_secret = "integration-test-secret"
            "#,
        )
        .expect("Failed to parse test config");
        config.auth.revocation_enabled = revocation;

        let store = Arc::new(MemoryCredentialStore::new());
        store.insert(TEST_EMAIL, test_password_hash());

        let codec = Arc::new(TokenCodec::new(&config.auth).expect("Failed to build token codec"));
        let hasher = Arc::new(PasswordHasher::new());
        let accounts = AccountProvisioner::new(store.clone(), hasher.clone(), &config.auth);
        let mut authenticator =
            SessionAuthenticator::new(store.clone(), hasher, codec, &config.auth)
                .expect("Failed to build authenticator");
        if revocation {
            authenticator = authenticator.with_denylist(Arc::new(MemoryTokenDenylist::new()));
        }

        let state = AppState {
            authenticator: Arc::new(authenticator),
            database: None,
        };

        Self {
            router: tally_api::build_app(state),
            store,
            accounts,
        }
    }

    /// Log in as the seeded account and return the session token
    pub async fn login(&self) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth",
                Some(serde_json::json!({
                    "email": TEST_EMAIL,
                    "password": TEST_PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response
            .session_token()
            .expect("No jwt cookie in login response")
    }

    /// Make an HTTP request to the test app, optionally carrying a `jwt` cookie
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, token).await
    }

    /// Make an HTTP request with an arbitrary body
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: impl Into<String>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::COOKIE, format!("jwt={}", token));
        }

        let req = req
            .body(Body::from(body.into()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// Value of the `jwt` cookie set by this response
    pub fn session_token(&self) -> Option<String> {
        let cookie = self.set_cookie.as_deref()?;
        let pair = cookie.split(';').next()?;
        pair.strip_prefix("jwt=").map(str::to_string)
    }

    /// Asserts the `{code, status, data}` envelope and returns `data`
    pub fn envelope(&self, code: u16, status: &str) -> &Value {
        assert_eq!(self.status.as_u16(), code, "body: {}", self.body);
        assert_eq!(self.body["code"], code);
        assert_eq!(self.body["status"], status);
        &self.body["data"]
    }
}
