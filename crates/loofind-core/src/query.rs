//! Prompt construction for toilet searches.

use serde::Serialize;

use crate::locale::Locale;
use crate::types::Coordinates;

/// What is sent to the search gateway: prompt text plus an optional geo-bias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prompt {
    pub text: String,
    pub geo_bias: Option<Coordinates>,
}

/// Builds the prompt for one search.
///
/// In nearby mode the free-text query is ignored even when present. Otherwise a
/// non-blank query selects the text variant; a blank or absent query falls back
/// to the vicinity variant. The geo-bias is attached whenever coordinates are
/// known, regardless of the variant.
///
/// Callers must reject requests with neither text nor coordinates before
/// calling this.
#[must_use]
pub fn build_prompt(
    free_text_query: Option<&str>,
    coordinates: Option<Coordinates>,
    nearby: bool,
    locale: Locale,
) -> Prompt {
    let query = free_text_query.map(str::trim).filter(|q| !q.is_empty());
    let text = match query {
        Some(q) if !nearby => locale.text_prompt(q),
        _ => locale.vicinity_prompt(),
    };

    Prompt {
        text,
        geo_bias: coordinates,
    }
}
