//! HTTP implementation of the [`Gateway`] contract.

use async_trait::async_trait;
use courier_contract::{DispatchConfig, DispatchError, Gateway, SearchHit};
use serde_json::{json, Value};

/// File-write endpoint, relative to the configured base URL.
pub const FILESYSTEM_WRITE_PATH: &str = "/wp-json/openkbs/v1/filesystem/write";
/// Job-callback endpoint, relative to the configured base URL.
pub const JOB_CALLBACK_PATH: &str = "/wp-json/openkbs/v1/callback";
/// Direct web-search endpoint.
pub const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
/// API-key header sent on callback-service requests.
pub const API_KEY_HEADER: &str = "WP-API-KEY";

/// reqwest-backed gateway to the callback service and the search API.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpGateway {
    pub fn new(config: &DispatchConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(DispatchError::transport)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Raise non-success statuses, preserving the response body for the
/// top-level error payload.
async fn require_success(response: reqwest::Response) -> Result<reqwest::Response, DispatchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Err(DispatchError::Endpoint {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Gateway for HttpGateway {
    /// The write endpoint's status is reported, not raised: the executor
    /// records success iff it is 200.
    async fn write_file(&self, path: &str, content: &str) -> Result<u16, DispatchError> {
        let response = self
            .client
            .post(self.endpoint(FILESYSTEM_WRITE_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({"path": path, "content": content}))
            .send()
            .await
            .map_err(DispatchError::transport)?;
        Ok(response.status().as_u16())
    }

    async fn notify_job(&self, post_id: &Value, message: &str) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(self.endpoint(JOB_CALLBACK_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({"post_id": post_id, "message": message, "type": "reload"}))
            .send()
            .await
            .map_err(DispatchError::transport)?;
        require_success(response).await?;
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        key: &str,
        engine_id: &str,
    ) -> Result<Vec<SearchHit>, DispatchError> {
        let response = self
            .client
            .get(CUSTOM_SEARCH_URL)
            .query(&[("q", query), ("key", key), ("cx", engine_id)])
            .send()
            .await
            .map_err(DispatchError::transport)?;
        let body: Value = require_success(response)
            .await?
            .json()
            .await
            .map_err(DispatchError::transport)?;
        // An absent `items` field means zero hits, not malformed data.
        match body.get("items") {
            Some(items) => {
                serde_json::from_value(items.clone()).map_err(DispatchError::transport)
            }
            None => Ok(Vec::new()),
        }
    }
}
