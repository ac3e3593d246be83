//! Customer store REST API client
//!
//! Thin async client over the store's REST API with bearer authentication.
//! Requests are issued one at a time and never retried.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::auth::{AuthManager, StoreCredentials};
use super::body_preview;
use super::endpoints::{paths, SearchCriteria};
use super::store::CustomerStore;
use crate::error::{ApiError, ApiResult};
use crate::models::{Customer, SearchResults};

/// Magento-style REST API client
#[derive(Clone)]
pub struct MagentoClient {
    /// HTTP client
    http: reqwest::Client,
    /// Base URL (e.g., "https://shop.example.com")
    base_url: String,
    /// Authentication manager
    auth: Arc<AuthManager>,
}

impl MagentoClient {
    /// Create a new client
    pub fn new(base_url: &str, credentials: StoreCredentials) -> ApiResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()?;
        let auth = Arc::new(AuthManager::new(&base_url, credentials, http.clone()));

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    /// Base URL the client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request with query parameters
    async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let token = self.auth.get_token().await?;

        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&token)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => ApiError::Authentication(message),
                404 => ApiError::NotFound(path.to_string()),
                _ => ApiError::Server {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        // Get response body as text first for debugging
        let body_text = response.text().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to read response body: {}", e))
        })?;

        serde_json::from_str(&body_text).map_err(|e| {
            tracing::error!(
                "JSON parse error for GET {}: {}. Body: {}",
                path,
                e,
                body_preview(&body_text, 1000)
            );
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl CustomerStore for MagentoClient {
    async fn get_list(&self, criteria: &SearchCriteria) -> ApiResult<SearchResults<Customer>> {
        self.get_with_query(paths::CUSTOMERS_SEARCH, &criteria.to_query())
            .await
    }
}
