//! Reshaping of Gemini responses into [`SearchResult`]s.

use loofind_core::{Locale, PlaceReference, SearchResult};

use crate::types::{GenerateContentResponse, GroundingChunk};

/// Converts a raw response into the domain result.
///
/// Empty text is replaced by the locale's fallback so `summary_text` is never
/// empty. Only chunks with a usable maps payload become places, in response
/// order.
#[must_use]
pub fn to_search_result(response: &GenerateContentResponse, locale: Locale) -> SearchResult {
    let summary_text = response
        .text()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| locale.fallback_summary().to_string());

    let places = response
        .grounding_chunks()
        .iter()
        .filter_map(to_place)
        .collect();

    SearchResult {
        summary_text,
        places,
    }
}

/// Maps one chunk to a place, or `None` when it has no recognizable place:
/// no `maps` object, or one with neither a title nor a link.
fn to_place(chunk: &GroundingChunk) -> Option<PlaceReference> {
    let maps = chunk.maps.as_ref()?;
    if maps.title.is_none() && maps.uri.is_none() {
        return None;
    }

    let review_snippets = maps
        .place_answer_sources
        .iter()
        .filter_map(|s| s.review_snippet.as_deref())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Some(PlaceReference {
        title: maps.title.clone().unwrap_or_default(),
        uri: maps.uri.clone().unwrap_or_default(),
        review_snippets,
    })
}
