//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! Wraps `reqwest` with API key handling, the Google Maps grounding tool, and
//! typed error envelopes. One call is one HTTP round trip; there is no retry.

use std::time::Duration;

use loofind_core::config::DEFAULT_GEMINI_BASE_URL;
use loofind_core::{Locale, Prompt};
use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GoogleMaps, LatLng,
    Part, RetrievalConfig, Tool, ToolConfig,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini API with Google Maps grounding enabled.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    locale: Locale,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// `timeout_secs` caps the whole call; `None` waits for as long as the
    /// service takes. Connecting is always bounded.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout_secs: Option<u64>,
        locale: Locale,
    ) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, timeout_secs, locale, DEFAULT_GEMINI_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: Option<u64>,
        locale: Locale,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("loofind/0.1 (toilet-search)");
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeminiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.trim_start_matches("models/").to_owned(),
            locale,
            base_url,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Sends one `generateContent` call for `prompt` with Maps grounding.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Api`] on a non-2xx status, with the error envelope
    ///   parsed when the body carries one.
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Deserialize`] if a 2xx body does not match the
    ///   expected shape.
    pub async fn generate_content(
        &self,
        prompt: &Prompt,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = self.endpoint_url()?;
        let request = build_request(prompt);

        tracing::debug!(
            model = %self.model,
            geo_bias = prompt.geo_bias.is_some(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
            context: format!("generateContent(model={})", self.model),
            source: e,
        })
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    fn endpoint_url(&self) -> Result<Url, GeminiError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|e| GeminiError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }
}

/// Builds the request body: one user turn, the Maps tool, and the geo-bias
/// when the prompt carries one.
pub(crate) fn build_request(prompt: &Prompt) -> GenerateContentRequest {
    let tool_config = prompt.geo_bias.map(|c| ToolConfig {
        retrieval_config: RetrievalConfig {
            lat_lng: LatLng {
                latitude: c.latitude,
                longitude: c.longitude,
            },
        },
    });

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(prompt.text.clone()),
            }],
        }],
        tools: vec![Tool {
            google_maps: Some(GoogleMaps::default()),
        }],
        tool_config,
    }
}

/// Turns a non-2xx response into [`GeminiError::Api`], reading the Google
/// error envelope when the body has one.
fn api_error(status: u16, body: &str) -> GeminiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => GeminiError::Api {
            status,
            code: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => GeminiError::Api {
            status,
            code: None,
            message: body.chars().take(200).collect(),
        },
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
