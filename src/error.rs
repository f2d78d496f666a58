use thiserror::Error;

/// Errors that abort an extraction. No partial results are returned.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no board ids given")]
    NoBoards,

    #[error("monday.com request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("monday.com returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// GraphQL-level errors, reported by monday.com alongside HTTP 200.
    #[error("monday.com rejected the query: {}", .0.join("; "))]
    Api(Vec<String>),

    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
