use thiserror::Error;

/// Failures surfaced by a [`ListApi`](crate::api::ListApi) call.
///
/// The controller collapses every variant into the single `error` string of
/// its state; the variants only differ in message text.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, TLS...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// The body was not a valid `{ items, meta }` page
    #[error("Invalid list response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Build a server error from a status and the raw response body.
    ///
    /// Bodies shaped `{"error": "..."}` or `{"message": "..."}` contribute
    /// their message; anything else falls back to the status reason.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v["error"]
                    .as_str()
                    .or_else(|| v["message"].as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            });

        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
