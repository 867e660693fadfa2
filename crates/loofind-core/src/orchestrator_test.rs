use std::sync::Mutex;

use super::*;
use crate::types::PlaceReference;

const BERLIN: Coordinates = Coordinates {
    latitude: 52.5,
    longitude: 13.4,
};

/// Gateway double that records every prompt and answers from a script.
struct ScriptedGateway {
    calls: Mutex<Vec<Prompt>>,
    answer: Result<SearchResult, SearchError>,
}

impl ScriptedGateway {
    fn ok(result: SearchResult) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            answer: Ok(result),
        }
    }

    fn failing(err: SearchError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            answer: Err(err),
        }
    }

    fn prompts(&self) -> Vec<Prompt> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchGateway for ScriptedGateway {
    async fn search(&self, prompt: &Prompt) -> Result<SearchResult, SearchError> {
        self.calls.lock().unwrap().push(prompt.clone());
        self.answer.clone()
    }
}

fn sample_result() -> SearchResult {
    SearchResult {
        summary_text: "Two toilets nearby.".to_string(),
        places: vec![PlaceReference {
            title: "WC Hauptbahnhof".to_string(),
            uri: "https://maps.google.com/?cid=1".to_string(),
            review_snippets: vec!["Clean".to_string()],
        }],
    }
}

#[test]
fn starts_idle() {
    let orch = SearchOrchestrator::new(Locale::German);
    assert_eq!(orch.outcome(), &SearchOutcome::Idle);
    assert!(!orch.can_submit());
    assert!(!orch.can_search_nearby());
}

#[test]
fn submission_without_query_or_coordinates_is_rejected_and_stays_idle() {
    let mut orch = SearchOrchestrator::new(Locale::German);
    orch.set_query("   ");
    assert_eq!(
        orch.begin(SearchIntent::Submit).unwrap_err(),
        Rejection::InvalidSubmission
    );
    assert_eq!(orch.outcome(), &SearchOutcome::Idle);
}

#[test]
fn nearby_without_coordinates_is_rejected_even_with_query() {
    let mut orch = SearchOrchestrator::new(Locale::German);
    orch.set_query("Berlin");
    assert_eq!(
        orch.begin(SearchIntent::Nearby).unwrap_err(),
        Rejection::InvalidSubmission
    );
    assert_eq!(orch.outcome(), &SearchOutcome::Idle);
}

#[test]
fn first_coordinate_fix_wins() {
    let mut orch = SearchOrchestrator::new(Locale::German);
    assert!(orch.capture_coordinates(BERLIN));
    assert!(!orch.capture_coordinates(Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    }));
    assert_eq!(orch.coordinates(), Some(BERLIN));
}

#[test]
fn submit_while_loading_is_ignored() {
    let mut orch = SearchOrchestrator::new(Locale::English);
    orch.set_query("Berlin Hauptbahnhof");
    let pending = orch.begin(SearchIntent::Submit).expect("first submission starts");
    assert!(orch.outcome().is_loading());

    orch.set_query("Something else");
    assert_eq!(orch.begin(SearchIntent::Submit).unwrap_err(), Rejection::Busy);
    assert!(!orch.can_submit());

    // The in-flight search is unchanged and still resolves.
    assert!(pending.prompt().text.contains("Berlin Hauptbahnhof"));
    assert!(orch.resolve(pending, Ok(sample_result())));
    assert_eq!(orch.outcome(), &SearchOutcome::Success(sample_result()));
}

#[test]
fn stale_ticket_is_dropped() {
    let mut orch = SearchOrchestrator::new(Locale::English);
    orch.set_query("A");
    let first = orch.begin(SearchIntent::Submit).unwrap();
    assert!(orch.resolve(first, Ok(sample_result())));

    let mut other = SearchOrchestrator::new(Locale::English);
    other.set_query("B");
    let foreign = other.begin(SearchIntent::Submit).unwrap();

    // Ticket 0 from another session does not match: nothing in flight here.
    assert!(!orch.resolve(foreign, Err(SearchError::search_failed(Locale::English))));
    assert_eq!(orch.outcome(), &SearchOutcome::Success(sample_result()));
}

#[test]
fn submit_request_carries_trimmed_query_and_coordinates() {
    let mut orch = SearchOrchestrator::new(Locale::English);
    orch.capture_coordinates(BERLIN);
    orch.set_query("  Zoo  ");
    let pending = orch.begin(SearchIntent::Submit).unwrap();
    assert_eq!(pending.request().free_text_query.as_deref(), Some("Zoo"));
    assert_eq!(pending.request().coordinates, Some(BERLIN));
    assert_eq!(pending.prompt().geo_bias, Some(BERLIN));
    assert_eq!(pending.intent(), SearchIntent::Submit);
}

#[tokio::test]
async fn text_only_search_sends_prompt_without_geo_bias() {
    let gateway = ScriptedGateway::ok(sample_result());
    let mut orch = SearchOrchestrator::new(Locale::German);
    orch.set_query("Berlin Hauptbahnhof");

    let outcome = orch.run(&gateway, SearchIntent::Submit).await.unwrap();
    assert_eq!(outcome, &SearchOutcome::Success(sample_result()));

    let prompts = gateway.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].text.contains("\"Berlin Hauptbahnhof\""));
    assert!(prompts[0].geo_bias.is_none());
}

#[tokio::test]
async fn nearby_search_sends_vicinity_prompt_with_geo_bias() {
    let gateway = ScriptedGateway::ok(sample_result());
    let mut orch = SearchOrchestrator::new(Locale::German);
    orch.capture_coordinates(BERLIN);
    orch.set_query("ignored");

    orch.run(&gateway, SearchIntent::Nearby).await.unwrap();

    let prompts = gateway.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].text, Locale::German.vicinity_prompt());
    assert_eq!(prompts[0].geo_bias, Some(BERLIN));
}

#[tokio::test]
async fn rejected_run_issues_no_call() {
    let gateway = ScriptedGateway::ok(sample_result());
    let mut orch = SearchOrchestrator::new(Locale::German);

    let err = orch.run(&gateway, SearchIntent::Submit).await.unwrap_err();
    assert_eq!(err, Rejection::InvalidSubmission);
    assert!(gateway.prompts().is_empty());
    assert_eq!(orch.outcome(), &SearchOutcome::Idle);
}

#[tokio::test]
async fn service_unavailable_becomes_failure_naming_model() {
    let gateway = ScriptedGateway::failing(SearchError::service_unavailable(
        "gemini-2.5-flash",
        Locale::German,
    ));
    let mut orch = SearchOrchestrator::new(Locale::German);
    orch.set_query("Hamburg");

    let outcome = orch.run(&gateway, SearchIntent::Submit).await.unwrap();
    match outcome {
        SearchOutcome::Failure(message) => {
            assert!(message.contains("gemini-2.5-flash"));
            assert!(message.contains("Standort wird nicht unterstützt"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn new_submission_after_failure_clears_error() {
    let failing = ScriptedGateway::failing(SearchError::search_failed(Locale::English));
    let working = ScriptedGateway::ok(sample_result());
    let mut orch = SearchOrchestrator::new(Locale::English);
    orch.set_query("Paris");

    orch.run(&failing, SearchIntent::Submit).await.unwrap();
    assert!(matches!(orch.outcome(), SearchOutcome::Failure(_)));

    let pending = orch.begin(SearchIntent::Submit).unwrap();
    assert_eq!(orch.outcome(), &SearchOutcome::Loading);
    let result = working.search(pending.prompt()).await;
    orch.resolve(pending, result);
    assert_eq!(orch.outcome(), &SearchOutcome::Success(sample_result()));
}
