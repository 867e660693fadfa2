//! Terminal rendering of the search state.
//!
//! Every function here is a pure projection of orchestrator state to text; no
//! decisions are taken in this module.

use std::fmt::Write as _;

use loofind_core::{
    Locale, PlaceReference, Rejection, SearchOrchestrator, SearchOutcome, SearchResult,
};
use serde::Serialize;

struct Strings {
    summary_heading: &'static str,
    empty_places: &'static str,
    loading: &'static str,
    error_prefix: &'static str,
    route_link: &'static str,
    features: [(&'static str, &'static str); 3],
    prompt_hint: &'static str,
    nearby_enabled: &'static str,
    nearby_disabled: &'static str,
    busy: &'static str,
    already_searching: &'static str,
    needs_place_or_location: &'static str,
}

static GERMAN: Strings = Strings {
    summary_heading: "Suche-Zusammenfassung",
    empty_places: "Keine spezifischen Orte in der Grounding-Antwort gefunden, aber schauen Sie oben in die Zusammenfassung.",
    loading: "Unsere KI sucht nach den besten Standorten...",
    error_prefix: "Fehler",
    route_link: "Route in Google Maps anzeigen",
    features: [
        (
            "Sauberkeit",
            "Filtern nach verifizierten Bewertungen für hygienische Standards.",
        ),
        (
            "Barrierefrei",
            "Informationen über Rollstuhlgerechtigkeit auf einen Blick.",
        ),
        (
            "Öffnungszeiten",
            "Immer wissen, welche Toilette gerade geöffnet ist.",
        ),
    ],
    prompt_hint: "Stadt, Straße oder Ort eingeben...",
    nearby_enabled: "/nearby sucht in Ihrer Nähe",
    nearby_disabled: "/nearby ist verfügbar, sobald Ihr Standort bekannt ist",
    busy: "Suche läuft...",
    already_searching: "Es läuft bereits eine Suche.",
    needs_place_or_location: "Bitte geben Sie einen Ort ein oder erlauben Sie den Standortzugriff.",
};

static ENGLISH: Strings = Strings {
    summary_heading: "Search summary",
    empty_places: "No specific places were found in the grounding response, but see the summary above.",
    loading: "Our AI is looking for the best locations...",
    error_prefix: "Error",
    route_link: "Show route in Google Maps",
    features: [
        ("Cleanliness", "Verified reviews about hygiene standards."),
        (
            "Accessibility",
            "Wheelchair accessibility information at a glance.",
        ),
        (
            "Opening hours",
            "Always know which toilet is open right now.",
        ),
    ],
    prompt_hint: "Enter a city, street or place...",
    nearby_enabled: "/nearby searches around you",
    nearby_disabled: "/nearby becomes available once your location is known",
    busy: "Search in progress...",
    already_searching: "A search is already in progress.",
    needs_place_or_location: "Enter a place to search for, or allow location access.",
};

fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::German => &GERMAN,
        Locale::English => &ENGLISH,
    }
}

/// Renders the current outcome as plain text.
#[must_use]
pub(crate) fn render_outcome(outcome: &SearchOutcome, locale: Locale) -> String {
    let s = strings(locale);
    match outcome {
        SearchOutcome::Idle => render_features(s),
        SearchOutcome::Loading => format!("{}\n", s.loading),
        SearchOutcome::Failure(message) => format!("{}: {message}\n", s.error_prefix),
        SearchOutcome::Success(result) => render_result(result, s),
    }
}

fn render_features(s: &Strings) -> String {
    let mut out = String::new();
    for (title, blurb) in &s.features {
        let _ = writeln!(out, "* {title}: {blurb}");
    }
    out
}

fn render_result(result: &SearchResult, s: &Strings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", s.summary_heading);
    let _ = writeln!(out, "{}", result.summary_text.trim_end());

    if result.places.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", s.empty_places);
        return out;
    }

    for (idx, place) in result.places.iter().enumerate() {
        let _ = writeln!(out);
        out.push_str(&render_card(idx + 1, place, s));
    }
    out
}

fn render_card(number: usize, place: &PlaceReference, s: &Strings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{number}] {}", place.title);
    for snippet in &place.review_snippets {
        let _ = writeln!(out, "    \"{snippet}\"");
    }
    let _ = writeln!(out, "    {}: {}", s.route_link, place.uri);
    out
}

/// The input hint shown in interactive mode, reflecting which intents are
/// currently accepted.
#[must_use]
pub(crate) fn render_controls(orchestrator: &SearchOrchestrator) -> String {
    let s = strings(orchestrator.locale());
    if orchestrator.outcome().is_loading() {
        return format!("({})", s.busy);
    }
    let nearby = if orchestrator.can_search_nearby() {
        s.nearby_enabled
    } else {
        s.nearby_disabled
    };
    format!("({} | {nearby} | /quit)", s.prompt_hint)
}

/// The notice shown when a submission did not start a search.
#[must_use]
pub(crate) fn render_rejection(rejection: Rejection, locale: Locale) -> &'static str {
    let s = strings(locale);
    match rejection {
        Rejection::Busy => s.already_searching,
        Rejection::InvalidSubmission => s.needs_place_or_location,
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonView<'a> {
    Result(&'a SearchResult),
    Error { error: &'a str },
    State { state: &'static str },
}

/// Renders the outcome as a single JSON document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render_json(outcome: &SearchOutcome) -> Result<String, serde_json::Error> {
    let view = match outcome {
        SearchOutcome::Success(result) => JsonView::Result(result),
        SearchOutcome::Failure(message) => JsonView::Error { error: message },
        SearchOutcome::Idle => JsonView::State { state: "idle" },
        SearchOutcome::Loading => JsonView::State { state: "loading" },
    };
    serde_json::to_string_pretty(&view)
}
