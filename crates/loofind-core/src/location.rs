//! One-shot acquisition of the device position.
//!
//! A session asks its provider exactly once. Failures are absorbed here: the
//! worst observable effect is a warning in the log.

use std::future::Future;
use std::time::Duration;

use crate::error::LocationError;
use crate::types::Coordinates;

/// A source of the current device position.
pub trait LocationProvider {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    fn locate(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Coordinates supplied up front, e.g. from CLI flags or configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Performs a single location attempt bounded by `timeout`.
///
/// Returns `None` on any failure; the error is logged at `warn` and goes no
/// further. Never retried.
pub async fn acquire_once<P>(provider: &P, timeout: Duration) -> Option<Coordinates>
where
    P: LocationProvider + ?Sized,
{
    let result = match tokio::time::timeout(timeout, provider.locate()).await {
        Ok(inner) => inner,
        Err(_) => Err(LocationError::TimedOut(timeout.as_secs())),
    };

    match result {
        Ok(coordinates) => {
            tracing::debug!(
                provider = provider.name(),
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                "location fix acquired"
            );
            Some(coordinates)
        }
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                error = %e,
                "location unavailable, continuing without geo-bias"
            );
            None
        }
    }
}
