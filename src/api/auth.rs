//! Authentication manager for the customer store API
//!
//! Hands out the bearer token for store requests. An integration token is
//! used as-is; admin credentials are exchanged for a token on first use.

use serde::Serialize;
use tokio::sync::RwLock;

use super::body_preview;
use super::endpoints::paths;
use crate::error::{ApiError, ApiResult};

/// How the client proves its identity to the store
#[derive(Clone)]
pub enum StoreCredentials {
    /// Pre-issued integration or admin access token
    Token(String),
    /// Admin user, exchanged for a token at the token endpoint
    Admin { username: String, password: String },
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(***)"),
            Self::Admin { username, .. } => write!(f, "Admin({username})"),
        }
    }
}

#[derive(Serialize)]
struct AdminTokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Manages the access token for store requests
pub struct AuthManager {
    /// Cached access token
    token: RwLock<Option<String>>,
    credentials: StoreCredentials,
    /// Base URL for auth endpoints
    base_url: String,
    http: reqwest::Client,
}

impl AuthManager {
    /// Create a new auth manager
    pub fn new(base_url: &str, credentials: StoreCredentials, http: reqwest::Client) -> Self {
        let token = match &credentials {
            StoreCredentials::Token(token) => Some(token.clone()),
            StoreCredentials::Admin { .. } => None,
        };

        Self {
            token: RwLock::new(token),
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Get the access token, exchanging admin credentials if needed
    pub async fn get_token(&self) -> ApiResult<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let token = match &self.credentials {
            StoreCredentials::Token(token) => token.clone(),
            StoreCredentials::Admin { username, password } => {
                self.exchange_admin_token(username, password).await?
            }
        };

        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    /// Exchange admin username/password for an access token
    async fn exchange_admin_token(&self, username: &str, password: &str) -> ApiResult<String> {
        let url = format!("{}{}", self.base_url, paths::ADMIN_TOKEN);
        tracing::debug!("Requesting admin token for '{}'", username);

        let response = self
            .http
            .post(&url)
            .json(&AdminTokenRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(match status {
                401 | 403 => ApiError::Authentication(message),
                _ => ApiError::Server { status, message },
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        // The token endpoint answers with a bare JSON string
        serde_json::from_str::<String>(&body).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "JSON parse error: {}. Body: {}",
                e,
                body_preview(&body, 500)
            ))
        })
    }
}
