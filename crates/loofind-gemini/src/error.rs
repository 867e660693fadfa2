use thiserror::Error;

/// Raw errors from the Gemini REST client.
///
/// These stay inside this crate's boundary: the [`SearchGateway`] impl logs
/// them and hands callers a normalized `SearchError` instead.
///
/// [`SearchGateway`]: loofind_core::SearchGateway
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Gemini API error {status} ({}): {message}", .code.as_deref().unwrap_or("UNKNOWN"))]
    Api {
        status: u16,
        /// Canonical status from the error envelope, e.g. `NOT_FOUND`.
        code: Option<String>,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GeminiError {
    /// Whether the service signalled an unresolvable or not-found condition:
    /// HTTP 404 or an error envelope with status `NOT_FOUND`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            GeminiError::Api { status, code, .. } => {
                *status == 404 || code.as_deref() == Some("NOT_FOUND")
            }
            GeminiError::Http(e) => e.status().is_some_and(|s| s.as_u16() == 404),
            GeminiError::Deserialize { .. } | GeminiError::InvalidBaseUrl { .. } => false,
        }
    }
}
