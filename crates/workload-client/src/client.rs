//! reqwest-backed policy API client

use async_trait::async_trait;
use groupsync_core::{endpoints, ApiError, Policy, PolicyApi, PolicyId};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

const API_VERSION_HEADER: &str = "api-version";

#[derive(Debug, Deserialize)]
struct PolicyList {
    policies: Vec<Policy>,
}

/// Client for the `/api/policies` endpoints, authenticated with a static API key
#[derive(Clone)]
pub struct WorkloadClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for WorkloadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkloadClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WorkloadClient {
    /// Client for the region-specific Workload Security host
    pub fn new(api_key: impl Into<String>, region: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: endpoints::base_url(region),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn policies_url(&self) -> String {
        format!("{}{}", self.base_url, endpoints::POLICIES)
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("ApiKey {}", self.api_key)).map_err(|e| {
            ApiError::Transport {
                url: self.base_url.clone(),
                reason: format!("invalid API key header: {e}"),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            API_VERSION_HEADER,
            HeaderValue::from_static(endpoints::API_VERSION),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn get(&self, url: &str) -> Result<Response, ApiError> {
        self.client
            .get(url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| transport_error(url, e))
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
        let body = response.text().await.map_err(|e| transport_error(url, e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl PolicyApi for WorkloadClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_policies(&self) -> Result<Vec<Policy>, ApiError> {
        let url = self.policies_url();
        let response = self.get(&url).await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Policy listing rejected");
            return Err(ApiError::ListFailed {
                status: status.as_u16(),
            });
        }

        let list: PolicyList = Self::decode(&url, response).await?;
        info!("Fetched {} policies", list.policies.len());
        Ok(list.policies)
    }

    #[instrument(skip(self), fields(policy_id = %policy_id))]
    async fn fetch_policy(&self, policy_id: PolicyId) -> Result<Policy, ApiError> {
        let url = endpoints::policy(&self.base_url, policy_id);
        let response = self.get(&url).await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Policy lookup rejected");
            return Err(ApiError::FetchFailed {
                policy_id,
                status: status.as_u16(),
            });
        }

        let policy: Policy = Self::decode(&url, response).await?;
        debug!(name = %policy.name, "Fetched policy");
        Ok(policy)
    }

    #[instrument(skip(self, policy), fields(name = %policy.name))]
    async fn create_policy(&self, policy: &Policy) -> Result<(), ApiError> {
        let url = self.policies_url();
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(policy)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Policy creation rejected");
            return Err(ApiError::CreateFailed {
                status: status.as_u16(),
            });
        }

        info!("Policy '{}' created", policy.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_host() {
        let client = WorkloadClient::new("secret", "us-1");
        assert_eq!(
            client.base_url(),
            "https://workload.us-1.cloudone.trendmicro.com"
        );
        assert_eq!(
            client.policies_url(),
            "https://workload.us-1.cloudone.trendmicro.com/api/policies"
        );
    }

    #[test]
    fn test_base_url_override_drops_trailing_slash() {
        let client = WorkloadClient::new("secret", "us-1").with_base_url("http://127.0.0.1:9000/");
        assert_eq!(client.policies_url(), "http://127.0.0.1:9000/api/policies");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = WorkloadClient::new("super-secret-key", "de-1");
        assert!(!format!("{client:?}").contains("super-secret-key"));
    }

    #[test]
    fn test_headers() {
        let headers = WorkloadClient::new("abc", "us-1").headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "ApiKey abc");
        assert_eq!(headers[API_VERSION_HEADER], "v1");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }
}
