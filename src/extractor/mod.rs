pub mod monday;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::board::BoardResult;

pub use monday::MondayExtractor;

#[async_trait]
pub trait BoardExtractor: Send + Sync {
    fn build_query(&self) -> String;
    /// Issue the query and return the decoded JSON body.
    async fn fetch_data(&self) -> Result<serde_json::Value>;
    /// Fetch and flatten every configured board. All or nothing.
    async fn extract(&self) -> Result<Vec<BoardResult>>;
}
