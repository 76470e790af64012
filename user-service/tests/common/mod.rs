use std::sync::Arc;

use auth::Authenticator;
use auth::TokenIssuer;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use user_service::domain::user::service::AuthService;
use user_service::inbound::http::router::create_router;
use user_service::inbound::http::session_cookie::SessionCookieSettings;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Lowest bcrypt cost keeps the suite fast.
const TEST_PASSWORD_COST: u32 = 4;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    /// Keeps the session cookie between requests.
    pub api_client: reqwest::Client,
    /// No cookie store; cookies are set by hand.
    pub bare_client: reqwest::Client,
    /// Signs tokens with the server's secret for forging sessions.
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_cookie_settings(SessionCookieSettings { secure: false }).await
    }

    pub async fn spawn_with_cookie_settings(session_cookie: SessionCookieSettings) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, TEST_PASSWORD_COST, Duration::hours(24))
                .expect("Failed to create authenticator"),
        );
        let store = Arc::new(InMemoryUserRepository::new());
        let auth_service = Arc::new(AuthService::new(store, authenticator));

        let router = create_router(auth_service, session_cookie);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            bare_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(TEST_SECRET).expect("Failed to create token issuer"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request carrying an explicit session cookie
    pub fn get_with_session(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.bare_client
            .get(&format!("{}{}", self.address, path))
            .header(reqwest::header::COOKIE, format!("Authorization={}", token))
    }

    /// Register a user, panicking unless the server answers 201.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/user")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Body every rejected session produces.
pub fn unauthenticated_body() -> Value {
    json!({ "status_code": 401, "data": { "message": "Unauthenticated" } })
}
