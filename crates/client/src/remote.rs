use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use funnel_core::error::{CaptureError, SyncError};

use crate::policy::FallbackPolicy;

/// Error body shape shared by every endpoint: `{"error": message}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Low-level JSON client for the funnel API. Cheap to clone; the
/// higher-level store, gateway, and capture types share one of these.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    policy: FallbackPolicy,
}

impl ApiClient {
    /// Build a client against `base_url` (e.g. `http://localhost:3030`).
    pub fn new(base_url: impl Into<String>, policy: FallbackPolicy) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(policy.request_timeout)
            .build()
            .map_err(|err| SyncError::Rejected(format!("failed to build http client: {err}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            policy,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CaptureError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| self.policy.classify(&err))?;
        let response = self.check(response).await?;
        response
            .json()
            .await
            .map_err(|err| SyncError::Rejected(format!("malformed response: {err}")).into())
    }

    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, CaptureError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| self.policy.classify(&err))?;
        let response = self.check(response).await?;
        response
            .json()
            .await
            .map_err(|err| SyncError::Rejected(format!("malformed response: {err}")).into())
    }

    pub async fn delete(&self, path: &str) -> Result<(), CaptureError> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|err| self.policy.classify(&err))?;
        self.check(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map non-success statuses onto the capture taxonomy: 404 is a
    /// lookup miss, 409 a duplicate id, other 4xx a terminal rejection,
    /// and 5xx a retryable outage.
    async fn check(&self, response: Response) -> Result<Response, CaptureError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(match status {
            StatusCode::NOT_FOUND => CaptureError::NotFound(message),
            StatusCode::CONFLICT => CaptureError::DuplicateId(message),
            s if s.is_server_error() => SyncError::Unavailable(message).into(),
            _ => SyncError::Rejected(message).into(),
        })
    }
}
