//! HTTP client for the backend auth endpoints.
//!
//! Exactly three operations cross this boundary: login, logout, verify.
//! Each returns a tagged result; no failure escapes as a panic.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::User;

use super::error::ErrorBody;
use super::ApiError;

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
}

/// Payload of a successful login: the bearer token and the identity it
/// proves.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: User,
}

/// Client for the backend auth endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Exchange credentials for a token and identity record.
    ///
    /// A blank username is dropped from the payload entirely. Any
    /// non-success status is returned as `Rejected` so the caller can show
    /// the server's own message.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let username = username.map(str::trim).filter(|u| !u.is_empty());

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                email,
                password,
                username,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Login rejected");
            return Err(ApiError::Rejected(ErrorBody::parse(status, &body)));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Tell the backend to end the session, credentials included.
    ///
    /// The session store treats the outcome as advisory; local teardown
    /// runs whether or not this call reaches the server.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = format!("{}/auth/logout", self.base_url);

        let response = self.client.post(&url).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Exchange a stored token for the current identity record.
    ///
    /// Only HTTP 200 counts as a live session. The caller does not
    /// distinguish a rejected token from an unreachable server.
    pub async fn verify(&self, token: &str) -> Result<User, ApiError> {
        let url = format!("{}/auth/me", self.base_url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let response = Self::check_response(response).await?;

        let me: MeResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(me.user)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{refused_base_url, serve_once};

    #[tokio::test]
    async fn test_login_success_returns_token_and_user() {
        let base_url = serve_once(
            "200 OK",
            r#"{"token":"tok-123","user":{"id":"1","email":"ada@example.com"}}"#,
        )
        .await;
        let client = AuthClient::new(base_url).unwrap();

        let login = client
            .login("ada@example.com", "hunter22", None)
            .await
            .expect("login should succeed");
        assert_eq!(login.token, "tok-123");
        assert_eq!(login.user.id, "1");
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_server_message() {
        let base_url = serve_once("400 Bad Request", r#"{"message":"Invalid credentials"}"#).await;
        let client = AuthClient::new(base_url).unwrap();

        let err = client
            .login("ada@example.com", "wrong", None)
            .await
            .expect_err("login should fail");
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_transport_failure_uses_transport_message() {
        let client = AuthClient::new(refused_base_url().await).unwrap();

        let err = client
            .login("ada@example.com", "hunter22", None)
            .await
            .expect_err("login should fail");
        assert!(matches!(err, ApiError::Network(_)));
        assert!(!err.user_message().is_empty());
    }

    #[tokio::test]
    async fn test_verify_200_yields_user() {
        let base_url = serve_once("200 OK", r#"{"user":{"id":"1"}}"#).await;
        let client = AuthClient::new(base_url).unwrap();

        let user = client.verify("tok-123").await.expect("verify should succeed");
        assert_eq!(user.id, "1");
    }

    #[tokio::test]
    async fn test_verify_401_fails() {
        let base_url = serve_once("401 Unauthorized", r#"{"message":"expired"}"#).await;
        let client = AuthClient::new(base_url).unwrap();

        let err = client.verify("stale").await.expect_err("verify should fail");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn test_logout_transport_failure_is_an_error_for_the_caller() {
        let client = AuthClient::new(refused_base_url().await).unwrap();
        assert!(client.logout().await.is_err());
    }

    #[tokio::test]
    async fn test_logout_2xx_succeeds() {
        let base_url = serve_once("204 No Content", "").await;
        let client = AuthClient::new(base_url).unwrap();
        assert!(client.logout().await.is_ok());
    }
}
