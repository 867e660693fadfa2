use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// A captured device position. Used as a geo-bias, never as a hard filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds coordinates after checking both components are finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::OutOfRange`] when latitude is outside
    /// `[-90, 90]` or longitude is outside `[-180, 180]`.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::OutOfRange {
                latitude,
                longitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::OutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// The committed inputs of one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchRequest {
    pub free_text_query: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl SearchRequest {
    /// A request may only be issued when it carries non-blank text or coordinates.
    #[must_use]
    pub fn is_issuable(&self) -> bool {
        self.has_text() || self.coordinates.is_some()
    }

    /// Whether the free-text query is present and not just whitespace.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.free_text_query
            .as_deref()
            .is_some_and(|q| !q.trim().is_empty())
    }
}

/// One grounded place citation returned by the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceReference {
    pub title: String,
    /// Opaque external link; never validated or fetched.
    pub uri: String,
    pub review_snippets: Vec<String>,
}

/// Normalized answer of one search.
///
/// `summary_text` is never empty. `places` may be empty even when the summary
/// is informative; the two are independent outputs of the same call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub summary_text: String,
    pub places: Vec<PlaceReference>,
}

/// The user intent that starts a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchIntent {
    /// Search near the draft free-text query, geo-biased when coordinates exist.
    Submit,
    /// Search the immediate vicinity of the captured coordinates; ignores the query.
    Nearby,
}

/// The entire observable state of the current search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum SearchOutcome {
    #[default]
    Idle,
    Loading,
    Success(SearchResult),
    Failure(String),
}

impl SearchOutcome {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchOutcome::Loading)
    }
}
