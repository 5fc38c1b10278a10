use reqwest::{Method, StatusCode, Url};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {detail}")]
    InvalidBaseUrl { url: String, detail: String },
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: Url,
        status: StatusCode,
    },
}

impl ClientError {
    /// HTTP status for errors caused by the server's answer
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }
}
