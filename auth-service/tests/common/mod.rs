use std::sync::Arc;

use auth::Authenticator;
use auth_service::config::CookieConfig;
use auth_service::domain::authentication::service::AuthService;
use auth_service::inbound::http::cookies::CookiePolicy;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemorySessionRepository;
use auth_service::outbound::repositories::InMemoryUserRepository;
use reqwest::header::HeaderMap;
use reqwest::header::SET_COOKIE;
use serde_json::json;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-for-jwt-signing-32-bytes";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-for-jwt-signing-32-bytes";

/// Test application that spawns a real server backed by in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(ACCESS_SECRET, REFRESH_SECRET));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemorySessionRepository::new()),
            Arc::clone(&authenticator),
        ));
        let cookies = CookiePolicy::new(
            &CookieConfig::default(),
            authenticator.access_ttl().num_seconds(),
            authenticator.refresh_ttl().num_seconds(),
        );

        let router = create_router(auth_service, cookies);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: cookie_client(),
        }
    }

    /// A second browser: its own cookie jar, same server.
    pub fn new_client(&self) -> reqwest::Client {
        cookie_client()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make a request carrying an explicit `Cookie` header and no jar
    pub fn post_with_cookie(&self, path: &str, cookie: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new()
            .post(self.url(path))
            .header(reqwest::header::COOKIE, cookie)
    }

    /// Helper to make a GET request carrying an explicit `Cookie` header and no jar
    pub fn get_with_cookie(&self, path: &str, cookie: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new()
            .get(self.url(path))
            .header(reqwest::header::COOKIE, cookie)
    }

    /// Register an account through the API with this app's default client
    pub async fn register(&self, email: &str, name: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&json!({
                "email": email,
                "name": name,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

fn cookie_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create reqwest client")
}

/// Value of the named cookie among a response's `Set-Cookie` headers
pub fn set_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
