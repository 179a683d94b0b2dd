//! Error type shared by the HTTP provider clients.

use btc_pay::ProviderError;

/// Errors that can occur when talking to a remote chain-data service.
#[derive(Debug, thiserror::Error)]
pub enum HttpProviderError {
    /// The HTTP request itself failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with a non-success status.
    #[error("server error ({status_code}): {message}")]
    Server {
        /// HTTP status code.
        status_code: u16,
        /// Response body, when available.
        message: String,
    },

    /// The response decoded but was not in the shape expected.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<HttpProviderError> for ProviderError {
    fn from(err: HttpProviderError) -> Self {
        ProviderError::new(err)
    }
}
