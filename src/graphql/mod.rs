pub mod queries;

#[cfg(test)]
pub mod mock;

use crate::error::{HistoryError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Request/response access to the indexer's GraphQL endpoint.
///
/// Implementations return the `data` member of the response. Retries, if
/// any, belong to the implementation; callers never retry.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn request(&self, query: &str) -> Result<Value>;
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// HTTP transport posting `{"query": ...}` documents to a GraphQL endpoint.
pub struct HttpGraphQlClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpGraphQlClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HistoryError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> HistoryError {
        if error.is_timeout() {
            HistoryError::Timeout(self.timeout)
        } else {
            HistoryError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl GraphQlTransport for HttpGraphQlClient {
    async fn request(&self, query: &str) -> Result<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", "SrgMarketHistory/1.0")
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if !response.status().is_success() {
            return Err(HistoryError::Transport(format!(
                "request failed with status {}",
                response.status()
            )));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(HistoryError::GraphQl(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| HistoryError::UnexpectedResponse("response has no data".to_string()))
    }
}
