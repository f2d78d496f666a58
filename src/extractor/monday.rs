use async_trait::async_trait;

use super::BoardExtractor;
use crate::error::{ExtractError, Result};
use crate::flatten::flatten_response;
use crate::model::board::BoardResult;
use crate::query::build_query;

pub const DEFAULT_ENDPOINT: &str = "https://api.monday.com/v2";

pub struct MondayExtractor {
    api_key: String,
    board_ids: Vec<String>,
    endpoint: String,
    client: reqwest::Client,
}

impl MondayExtractor {
    pub fn new<I>(api_key: impl Into<String>, board_ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        Self {
            api_key: api_key.into(),
            board_ids: board_ids.into_iter().map(|id| id.to_string()).collect(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn board_ids(&self) -> &[String] {
        &self.board_ids
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BoardExtractor for MondayExtractor {
    fn build_query(&self) -> String {
        build_query(self.board_ids.as_slice())
    }

    async fn fetch_data(&self) -> Result<serde_json::Value> {
        let body = serde_json::json!({ "query": self.build_query() });
        tracing::debug!(endpoint = %self.endpoint, boards = self.board_ids.len(), "querying monday.com");

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "request failed");
                ExtractError::Transport(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = error_body(resp.text().await);
            tracing::error!(status = status.as_u16(), %body, "request failed");
            return Err(ExtractError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json().await.map_err(|e| {
            tracing::error!(error = %e, "response body is not JSON");
            ExtractError::Transport(e)
        })
    }

    async fn extract(&self) -> Result<Vec<BoardResult>> {
        if self.board_ids.is_empty() {
            return Err(ExtractError::NoBoards);
        }
        let data = self.fetch_data().await?;
        flatten_response(data)
    }
}

/// Body text for a failed response, or a placeholder naming why it could not be read.
fn error_body<E: std::fmt::Display>(body: std::result::Result<String, E>) -> String {
    body.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read error response body");
        format!("<unreadable body: {e}>")
    })
}
