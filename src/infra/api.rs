//! Fetch primitive: one code path for every remote API call.
//!
//! The client requires an [`AuthProvider`] and refuses to issue a request
//! without a resolved token, so callers cannot forget the auth gate. Every
//! failure is classified into an [`ApiError`] kind before it leaves this
//! module.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use metrics::histogram;
use reqwest::{Client, Method, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use scorta_api_types::{ApiEnvelope, ErrorBody, ListData, RecordPage};

use crate::config::ApiSettings;
use crate::domain::query::ListQuery;
use crate::domain::resources::{ListResource, ResourcePath};

use super::error::{ApiError, InfraError};

const METRIC_API_REQUEST_MS: &str = "scorta_api_request_ms";

/// Supplies the bearer token for API calls and receives the
/// session-invalidation signal on `Unauthorized` responses.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current bearer token, or `None` when no session is established.
    async fn bearer_token(&self) -> Option<String>;

    /// Called when the API rejects the session (401/403).
    fn session_invalidated(&self) {}
}

/// Fixed-token provider for headless clients and tests.
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        Some(self.token.clone())
    }
}

/// HTTP client for the console API.
pub struct ApiClient {
    client: Client,
    base: Url,
    auth: Arc<dyn AuthProvider>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, auth: Arc<dyn AuthProvider>) -> Result<Self, InfraError> {
        let base = Url::parse(&settings.base_url)
            .and_then(|url| url.join("/"))
            .map_err(|err| {
                InfraError::configuration(format!(
                    "invalid api.base_url `{}`: {err}",
                    settings.base_url
                ))
            })?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.request_timeout())
            .build()
            .map_err(|err| InfraError::configuration(format!("failed to build client: {err}")))?;
        Ok(Self { client, base, auth })
    }

    pub fn user_agent() -> &'static str {
        concat!("scorta/", env!("CARGO_PKG_VERSION"))
    }

    /// Fetch one page of a list resource.
    pub async fn list<T: ListResource>(&self, query: &ListQuery) -> Result<RecordPage<T>, ApiError> {
        let pairs = query.to_query_pairs();
        let envelope: ApiEnvelope<ListData<T>> = self
            .request(Method::GET, T::PATH, None, Some(&pairs), None)
            .await?;
        let data = envelope
            .data
            .ok_or_else(|| ApiError::decode("list response carried no data"))?;
        Ok(RecordPage::from(data))
    }

    pub async fn create<T: ListResource>(
        &self,
        payload: &T::Payload,
    ) -> Result<Option<T>, ApiError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| ApiError::decode(format!("failed to encode payload: {err}")))?;
        let envelope: ApiEnvelope<T> = self
            .request(Method::POST, T::PATH, None, None, Some(body))
            .await?;
        Ok(envelope.data)
    }

    pub async fn update<T: ListResource>(
        &self,
        id: &str,
        payload: &T::Payload,
    ) -> Result<Option<T>, ApiError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| ApiError::decode(format!("failed to encode payload: {err}")))?;
        let envelope: ApiEnvelope<T> = self
            .request(Method::PUT, T::PATH, Some(id), None, Some(body))
            .await?;
        Ok(envelope.data)
    }

    pub async fn delete<T: ListResource>(&self, id: &str) -> Result<Option<T>, ApiError> {
        let envelope: ApiEnvelope<T> = self
            .request(Method::DELETE, T::PATH, Some(id), None, None)
            .await?;
        Ok(envelope.data)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: ResourcePath,
        id: Option<&str>,
        query: Option<&[(String, String)]>,
        body: Option<serde_json::Value>,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        // Fail fast: no call leaves this client without a resolved session.
        let Some(token) = self.auth.bearer_token().await else {
            return Err(ApiError::Unauthorized);
        };

        let mut url = self.url(path, id)?;
        if let Some(pairs) = query {
            let mut qp = url.query_pairs_mut();
            for (key, value) in pairs {
                qp.append_pair(key, value);
            }
        }

        debug!(%method, %url, "API request");

        let mut req = self
            .client
            .request(method.clone(), url)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        if let Some(body) = body {
            req = req.json(&body);
        }

        let started_at = Instant::now();
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        histogram!(METRIC_API_REQUEST_MS).record(started_at.elapsed().as_millis() as f64);

        if !status.is_success() {
            return Err(self.classify_failure(method, path, status, &bytes));
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::decode(format!("failed to parse response body: {err}")))
    }

    fn classify_failure(
        &self,
        method: Method,
        path: ResourcePath,
        status: StatusCode,
        bytes: &[u8],
    ) -> ApiError {
        let body: ErrorBody = serde_json::from_slice(bytes).unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), body);
        warn!(%method, %path, status = status.as_u16(), kind = %error, "API request failed");
        if error.is_unauthorized() {
            self.auth.session_invalidated();
        }
        error
    }

    fn url(&self, path: ResourcePath, id: Option<&str>) -> Result<Url, ApiError> {
        let joined = match id {
            Some(id) => self.base.join(&format!("{}/{id}", path.as_str())),
            None => self.base.join(path.as_str()),
        };
        joined.map_err(|err| ApiError::decode(format!("invalid request URL: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiSettings;

    struct NoSession;

    #[async_trait]
    impl AuthProvider for NoSession {
        async fn bearer_token(&self) -> Option<String> {
            None
        }
    }

    fn settings() -> ApiSettings {
        ApiSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        let settings = ApiSettings {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let result = ApiClient::new(&settings, Arc::new(StaticToken::new("k")));
        assert!(matches!(result, Err(InfraError::Configuration { .. })));
    }

    #[tokio::test]
    async fn missing_token_fails_fast_without_network() {
        // Base URL points at a closed port; the Unauthorized must surface
        // before any connection attempt.
        let client = ApiClient::new(&settings(), Arc::new(NoSession)).expect("client");
        let query = ListQuery::default();
        let result = client
            .list::<scorta_api_types::InventoryRecord>(&query)
            .await;
        assert_eq!(result.unwrap_err(), ApiError::Unauthorized);
    }

    #[test]
    fn url_joins_id_segments() {
        let client = ApiClient::new(&settings(), Arc::new(StaticToken::new("k"))).expect("client");
        let url = client
            .url(ResourcePath::Products, Some("abc"))
            .expect("joined url");
        assert_eq!(url.path(), "/api/v1/products/abc");
    }
}
