//! Error type shared by every API call.
//!
//! Rejections by the server keep their status and raw body; everything else
//! wraps the underlying transport, URL or JSON error.

/// Errors returned by [`MinesweeperClient`](crate::MinesweeperClient)
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status code of 300 or above
    #[error("Unexpected API response\nStatus code: {status}\nBody: {body}")]
    UnexpectedApiResponse { status: u16, body: String },
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Status code of a rejected response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedApiResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}
