//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use std::time::Duration;

use loofind_core::{
    Coordinates, Locale, Prompt, SearchError, SearchGateway, SearchIntent, SearchOrchestrator,
    SearchOutcome,
};
use loofind_gemini::{GeminiClient, GeminiError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn test_client(base_url: &str, locale: Locale) -> GeminiClient {
    GeminiClient::with_base_url("test-key", "gemini-2.5-flash", None, locale, base_url)
        .expect("client construction should not fail")
}

fn text_prompt() -> Prompt {
    loofind_core::build_prompt(Some("Berlin Hauptbahnhof"), None, false, Locale::German)
}

fn grounded_body() -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [ { "text": "Im Hauptbahnhof gibt es zwei Toiletten." } ]
            },
            "groundingMetadata": {
                "groundingChunks": [
                    {
                        "maps": {
                            "title": "McClean Hauptbahnhof",
                            "uri": "https://maps.google.com/?cid=1",
                            "placeAnswerSources": [
                                { "reviewSnippet": "Sehr sauber" },
                                { "reviewSnippet": "" }
                            ]
                        }
                    },
                    { "web": { "title": "Forum", "uri": "https://forum.example" } },
                    {
                        "maps": {
                            "title": "WC Europaplatz",
                            "uri": "https://maps.google.com/?cid=2"
                        }
                    }
                ]
            }
        }]
    })
}

#[tokio::test]
async fn search_returns_summary_and_map_places() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({ "tools": [ { "googleMaps": {} } ] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Locale::German);
    let result = client.search(&text_prompt()).await.expect("search should succeed");

    assert_eq!(result.summary_text, "Im Hauptbahnhof gibt es zwei Toiletten.");
    assert_eq!(result.places.len(), 2);
    assert_eq!(result.places[0].title, "McClean Hauptbahnhof");
    assert_eq!(result.places[0].review_snippets, ["Sehr sauber"]);
    assert_eq!(result.places[1].uri, "https://maps.google.com/?cid=2");
    assert!(result.places[1].review_snippets.is_empty());
}

#[tokio::test]
async fn text_only_request_has_no_tool_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Locale::German);
    client.search(&text_prompt()).await.unwrap();

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("toolConfig").is_none());
    assert!(body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("Berlin Hauptbahnhof"));
}

#[tokio::test]
async fn geo_bias_is_sent_as_retrieval_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "toolConfig": {
                "retrievalConfig": { "latLng": { "latitude": 52.5, "longitude": 13.4 } }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_body()))
        .expect(1)
        .mount(&server)
        .await;

    let prompt = loofind_core::build_prompt(
        None,
        Some(Coordinates {
            latitude: 52.5,
            longitude: 13.4,
        }),
        true,
        Locale::German,
    );
    let client = test_client(&server.uri(), Locale::German);
    client.search(&prompt).await.expect("search should succeed");
}

#[tokio::test]
async fn slow_answer_is_awaited_without_configured_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(grounded_body())
                .set_delay(Duration::from_millis(1500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Locale::German);
    let result = client
        .search(&text_prompt())
        .await
        .expect("a slow answer is still an answer");
    assert_eq!(result.places.len(), 2);
}

#[tokio::test]
async fn configured_timeout_caps_the_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(grounded_body())
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url(
        "test-key",
        "gemini-2.5-flash",
        Some(1),
        Locale::English,
        &server.uri(),
    )
    .unwrap();
    let err = client.search(&text_prompt()).await.unwrap_err();
    assert_eq!(err, SearchError::search_failed(Locale::English));
}

#[tokio::test]
async fn empty_response_yields_fallback_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Locale::English);
    let result = client.search(&text_prompt()).await.unwrap();
    assert_eq!(result.summary_text, "I could not find any information.");
    assert!(result.places.is_empty());
}

#[tokio::test]
async fn not_found_becomes_service_unavailable_naming_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "models/gemini-2.5-flash is not found for API version v1beta",
                "status": "NOT_FOUND"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Locale::German);
    let err = client.search(&text_prompt()).await.unwrap_err();
    assert!(matches!(err, SearchError::ServiceUnavailable { .. }));
    assert!(err.message().contains("gemini-2.5-flash"));
    assert!(err.message().contains("nicht unterstützt"));
}

#[tokio::test]
async fn server_error_becomes_generic_failure_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Locale::English);
    let err = client.search(&text_prompt()).await.unwrap_err();
    assert_eq!(err, SearchError::search_failed(Locale::English));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Locale::English);
    let err = client.generate_content(&text_prompt()).await.unwrap_err();
    assert!(matches!(err, GeminiError::Deserialize { .. }));

    let normalized = client.search(&text_prompt()).await.unwrap_err();
    assert!(matches!(normalized, SearchError::SearchFailed { .. }));
}

#[tokio::test]
async fn orchestrator_reaches_failure_on_unsupported_region() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), Locale::German);
    let mut orchestrator = SearchOrchestrator::new(Locale::German);
    orchestrator.set_query("Berlin Hauptbahnhof");

    let outcome = orchestrator
        .run(&client, SearchIntent::Submit)
        .await
        .expect("submission should be accepted");

    match outcome {
        SearchOutcome::Failure(message) => {
            assert!(message.contains("gemini-2.5-flash"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
