use thiserror::Error;

use crate::locale::Locale;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Normalized search failures, as surfaced to the user.
///
/// The message is already localized; callers display it verbatim and never
/// see the underlying transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The service reported a not-found condition: unknown model, or the
    /// place-grounding capability is unavailable for this location.
    #[error("{message}")]
    ServiceUnavailable { model: String, message: String },

    /// Any other transport or service failure.
    #[error("{message}")]
    SearchFailed { message: String },
}

impl SearchError {
    #[must_use]
    pub fn service_unavailable(model: &str, locale: Locale) -> Self {
        Self::ServiceUnavailable {
            model: model.to_string(),
            message: locale.service_unavailable_message(model),
        }
    }

    #[must_use]
    pub fn search_failed(locale: Locale) -> Self {
        Self::SearchFailed {
            message: locale.search_failed_message().to_string(),
        }
    }

    /// The user-facing text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::ServiceUnavailable { message, .. } | Self::SearchFailed { message } => message,
        }
    }
}

/// Failures of the one-shot location fix. Never shown to the user.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location lookup is not supported: {0}")]
    Unsupported(String),

    #[error("location lookup failed: {0}")]
    Failed(String),

    #[error("location lookup timed out after {0}s")]
    TimedOut(u64),

    #[error("coordinates out of range: {latitude}, {longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}
