//! Search request lifecycle: `Idle → Loading → Success | Failure`, re-entrant
//! for the life of the session.
//!
//! A [`SearchOrchestrator`] is created once per session and owns every piece
//! of mutable session state: the captured coordinates, the draft query and the
//! current [`SearchOutcome`]. Presentation code reads it and dispatches intents;
//! it never mutates the outcome directly.
//!
//! A search is split into [`SearchOrchestrator::begin`] and
//! [`SearchOrchestrator::resolve`] so the gateway call can run while the owner
//! keeps handling input. At most one search is in flight; submissions that
//! arrive meanwhile are rejected with [`Rejection::Busy`] and leave the
//! in-flight call untouched.

use thiserror::Error;

use crate::error::SearchError;
use crate::gateway::SearchGateway;
use crate::locale::Locale;
use crate::query::{build_prompt, Prompt};
use crate::types::{Coordinates, SearchIntent, SearchOutcome, SearchRequest, SearchResult};

/// Why a submission did not start a search. Neither case changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("a search is already in progress")]
    Busy,

    #[error("enter a place to search for, or allow location access")]
    InvalidSubmission,
}

/// Ticket for the single in-flight search, handed back to `resolve`.
#[derive(Debug)]
pub struct PendingSearch {
    ticket: u64,
    intent: SearchIntent,
    request: SearchRequest,
    prompt: Prompt,
}

impl PendingSearch {
    #[must_use]
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    #[must_use]
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    #[must_use]
    pub fn intent(&self) -> SearchIntent {
        self.intent
    }
}

#[derive(Debug, Default)]
pub struct SearchOrchestrator {
    locale: Locale,
    query: String,
    coordinates: Option<Coordinates>,
    outcome: SearchOutcome,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the draft free-text query. Does not start a search.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Records the session's location fix. The first fix wins; later ones are
    /// ignored and `false` is returned.
    pub fn capture_coordinates(&mut self, coordinates: Coordinates) -> bool {
        if self.coordinates.is_some() {
            tracing::debug!("coordinates already captured, ignoring later fix");
            return false;
        }
        self.coordinates = Some(coordinates);
        true
    }

    /// Whether a free-text submission would be accepted right now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.outcome.is_loading() && self.draft_request(SearchIntent::Submit).is_issuable()
    }

    /// Whether a nearby search would be accepted right now.
    #[must_use]
    pub fn can_search_nearby(&self) -> bool {
        !self.outcome.is_loading() && self.coordinates.is_some()
    }

    /// Moves to `Loading` and returns the search to run.
    ///
    /// The previous result or error is discarded.
    ///
    /// # Errors
    ///
    /// - [`Rejection::Busy`] while another search is in flight.
    /// - [`Rejection::InvalidSubmission`] when there is neither a query nor
    ///   coordinates, or for a nearby search without coordinates.
    pub fn begin(&mut self, intent: SearchIntent) -> Result<PendingSearch, Rejection> {
        if self.outcome.is_loading() {
            tracing::debug!(?intent, "search in flight, submission ignored");
            return Err(Rejection::Busy);
        }

        let request = self.draft_request(intent);
        let allowed = match intent {
            SearchIntent::Submit => request.is_issuable(),
            SearchIntent::Nearby => request.coordinates.is_some(),
        };
        if !allowed {
            return Err(Rejection::InvalidSubmission);
        }

        let prompt = build_prompt(
            request.free_text_query.as_deref(),
            request.coordinates,
            intent == SearchIntent::Nearby,
            self.locale,
        );

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.outcome = SearchOutcome::Loading;

        tracing::info!(
            ticket,
            ?intent,
            geo_bias = prompt.geo_bias.is_some(),
            "search started"
        );

        Ok(PendingSearch {
            ticket,
            intent,
            request,
            prompt,
        })
    }

    /// Applies the gateway's answer for `pending`.
    ///
    /// Returns `false`, leaving state untouched, when `pending` is not the
    /// search currently in flight.
    pub fn resolve(
        &mut self,
        pending: PendingSearch,
        result: Result<SearchResult, SearchError>,
    ) -> bool {
        if self.in_flight != Some(pending.ticket) {
            tracing::warn!(ticket = pending.ticket, "stale search resolution dropped");
            return false;
        }
        self.in_flight = None;

        self.outcome = match result {
            Ok(result) => {
                tracing::info!(
                    ticket = pending.ticket,
                    places = result.places.len(),
                    "search succeeded"
                );
                SearchOutcome::Success(result)
            }
            Err(e) => {
                tracing::info!(ticket = pending.ticket, error = %e, "search failed");
                SearchOutcome::Failure(e.message().to_string())
            }
        };
        true
    }

    /// Runs one search end to end against `gateway`.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] from [`Self::begin`]; gateway failures are
    /// not errors here, they become [`SearchOutcome::Failure`].
    pub async fn run<G>(
        &mut self,
        gateway: &G,
        intent: SearchIntent,
    ) -> Result<&SearchOutcome, Rejection>
    where
        G: SearchGateway + ?Sized,
    {
        let pending = self.begin(intent)?;
        let result = gateway.search(pending.prompt()).await;
        self.resolve(pending, result);
        Ok(&self.outcome)
    }

    fn draft_request(&self, intent: SearchIntent) -> SearchRequest {
        let free_text_query = match intent {
            SearchIntent::Nearby => None,
            SearchIntent::Submit => {
                let trimmed = self.query.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        };
        SearchRequest {
            free_text_query,
            coordinates: self.coordinates,
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
