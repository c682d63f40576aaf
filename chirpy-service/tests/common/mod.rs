use std::sync::Arc;

use auth::Authenticator;
use auth::Clock;
use auth::FixedClock;
use auth::JwtHandler;
use chirpy_service::account::service::AccountService;
use chirpy_service::chirp::service::ChirpService;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chirpy_service::outbound::repositories::InMemoryAccountRepository;
use chirpy_service::outbound::repositories::InMemoryChirpRepository;
use chirpy_service::outbound::repositories::InMemoryDatabase;
use chirpy_service::outbound::repositories::InMemoryRefreshTokenRepository;
use chirpy_service::session::service::SessionService;
use chirpy_service::session::store::RefreshTokenStore;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "chirpy";
pub const POLKA_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<FixedClock>,
    pub jwt_handler: JwtHandler,
}

/// Account created and logged in through the API
pub struct TestSession {
    pub id: String,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Spawn the application on the development platform
    pub async fn spawn() -> Self {
        Self::spawn_with_platform(true).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_platform(development: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(FixedClock::new(Utc::now()));
        let shared_clock: Arc<dyn Clock> = clock.clone();

        let database = InMemoryDatabase::new();
        let account_repository = Arc::new(InMemoryAccountRepository::new(database.clone()));
        let refresh_token_repository =
            Arc::new(InMemoryRefreshTokenRepository::new(database.clone()));
        let chirp_repository = Arc::new(InMemoryChirpRepository::new(database));

        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, JWT_ISSUER, Duration::hours(1))
                .with_clock(Arc::clone(&shared_clock)),
        );

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&account_repository),
            Arc::clone(&authenticator),
            Arc::clone(&shared_clock),
        ));
        let session_service = Arc::new(SessionService::new(
            account_repository,
            RefreshTokenStore::new(
                refresh_token_repository,
                Arc::clone(&shared_clock),
                Duration::days(60),
            ),
            authenticator,
            Arc::clone(&shared_clock),
        ));
        let chirp_service = Arc::new(ChirpService::new(
            chirp_repository,
            Arc::clone(&shared_clock),
        ));

        let state = AppState::new(
            account_service,
            session_service,
            chirp_service,
            POLKA_API_KEY,
            development,
        );
        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler =
            JwtHandler::new(JWT_SECRET, JWT_ISSUER).with_clock(shared_clock);

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
            jwt_handler,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register an account and return the response data
    pub async fn create_account(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning both tokens
    pub async fn signed_in(&self, email: &str, password: &str) -> TestSession {
        self.create_account(email, password).await;

        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        let data = &body["data"];

        TestSession {
            id: data["id"].as_str().unwrap().to_string(),
            email: email.to_string(),
            token: data["token"].as_str().unwrap().to_string(),
            refresh_token: data["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn refresh(&self, refresh_token: &str) -> reqwest::Response {
        self.post("/api/refresh")
            .bearer_auth(refresh_token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn revoke(&self, refresh_token: &str) -> reqwest::Response {
        self.post("/api/revoke")
            .bearer_auth(refresh_token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Publish a chirp and return the response data
    pub async fn create_chirp(&self, token: &str, body: &str) -> Value {
        let response = self
            .post("/api/chirps")
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}

/// Extract the error message of an error response
pub async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["message"].as_str().unwrap_or_default().to_string()
}
