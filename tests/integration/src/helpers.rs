//! Test helpers for integration tests
//!
//! Spawns a server wired to a recording mailer, makes HTTP requests and
//! seeds accounts that the public API cannot create on its own.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use catalog_api::{create_app, create_app_state_with_mailer, AppState};
use catalog_common::{hash_password, AppConfig};
use catalog_core::{NewUser, Role};
use catalog_service::{Mailer, RecordingEmailSender};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{unique_suffix, LoginForm, RegisterRequest, TokenResponse};

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// An authenticated account
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Every email the server sent
    pub outbox: RecordingEmailSender,
    state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let outbox = RecordingEmailSender::new();
        let mailer = Mailer::new(Arc::new(outbox.clone()), config.email.frontend_url.clone());

        let state = create_app_state_with_mailer(config, mailer).await?;
        let app = create_app(state.clone())?;

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            outbox,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    /// GET a path outside the API prefix (health checks)
    pub async fn get_root(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request without a body (query-string endpoints)
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    /// Make a form-encoded POST request
    pub async fn post_form<T: Serialize>(&self, path: &str, form: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).form(form).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Log in through the token endpoint
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.post_form("/auth/token", &form).await?;
        let token: TokenResponse = assert_json(response, StatusCode::OK).await?;
        Ok(token.access_token)
    }

    /// The token embedded in the last email sent to `email`
    pub fn mailed_token(&self, email: &str, marker: &str) -> Result<String> {
        let mail = self
            .outbox
            .last_to(email)
            .with_context(|| format!("no email sent to {email}"))?;
        token_after(&mail.body, marker).with_context(|| format!("no {marker} link in email"))
    }

    /// Register through the API, activate via the mailed link and log in
    pub async fn register_user(&self) -> Result<TestUser> {
        let request = RegisterRequest::unique();
        let response = self.post("/users/register", &request).await?;
        assert_status(response, StatusCode::CREATED).await?;

        let activation = self.mailed_token(&request.email, "activation_token=")?;
        let response = self
            .post_empty(&format!(
                "/users/account/activation?activation_token={activation}"
            ))
            .await?;
        assert_status(response, StatusCode::OK).await?;

        let token = self.login(&request.username, &request.password).await?;
        let user = self
            .state
            .service_context()
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .context("registered user missing")?;

        Ok(TestUser {
            id: user.id,
            username: request.username,
            email: request.email,
            password: request.password,
            token,
        })
    }

    /// Insert an active admin directly; the API never grants the first one
    pub async fn seed_admin(&self) -> Result<TestUser> {
        let suffix = unique_suffix();
        let username = format!("admin_{suffix}");
        let email = format!("admin_{suffix}@example.com");
        let password = "AdminPass123!".to_string();

        let new_user = NewUser {
            username: username.clone(),
            email: email.clone(),
            password_hash: hash_password(&password)?,
            role: Role::Admin,
            is_active: true,
            avatar: None,
        };
        let user = self
            .state
            .service_context()
            .user_repo()
            .create(&new_user)
            .await?;

        let token = self.login(&username, &password).await?;
        Ok(TestUser {
            id: user.id,
            username,
            email,
            password,
            token,
        })
    }
}

/// Pull the value following `marker` out of an email body
pub fn token_after(body: &str, marker: &str) -> Option<String> {
    let start = body.find(marker)? + marker.len();
    let token: String = body[start..]
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    (!token.is_empty()).then_some(token)
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for var in ["DATABASE_URL", "JWT_SECRET", "API_PORT"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_after() {
        let body = "Hello, bob!\n\nhttp://localhost:3000/login?activation_token=abc.def.ghi\n";
        assert_eq!(
            token_after(body, "activation_token=").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(token_after(body, "token=x"), None);
    }
}
