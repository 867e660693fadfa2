//! IP-based location lookup, standing in for a device geolocation API.

use std::time::Duration;

use loofind_core::{Coordinates, LocationError, LocationProvider};
use serde::Deserialize;

/// Looks up the approximate position of the caller's public IP.
///
/// Expects the `ipapi.co` JSON shape: `{"latitude", "longitude"}` on success,
/// `{"error": true, "reason"}` on failure.
pub(crate) struct IpLocator {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpLocateResponse {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

impl IpLocator {
    pub(crate) fn new(url: &str, timeout_secs: u64) -> Result<Self, LocationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("loofind/0.1 (toilet-search)")
            .build()
            .map_err(|e| LocationError::Unsupported(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl LocationProvider for IpLocator {
    fn name(&self) -> &'static str {
        "ip"
    }

    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Failed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LocationError::Failed(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let body: IpLocateResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Failed(format!("response parse error: {e}")))?;

        if body.error {
            return Err(LocationError::Failed(
                body.reason.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lng)) => Coordinates::try_new(lat, lng),
            _ => Err(LocationError::Failed(
                "response carried no coordinates".to_string(),
            )),
        }
    }
}
