// Error types shared by the gateway, the token store and the operations.
// Rejections (non-200 answers) are expected and rendered by the UI; the
// remaining variants are faults that end the process.

use std::path::PathBuf;
use thiserror::Error;

pub type CourierResult<T> = Result<T, CourierError>;

#[derive(Debug, Error)]
pub enum CourierError {
    /// The server answered with something other than 200. `message` is the
    /// server's `message` field when present.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("token file {}: {source}", path.display())]
    TokenStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl CourierError {
    /// True for a server-side rejection, false for local or transport faults.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CourierError::Rejected { .. })
    }
}
