use serde_json::json;

use super::*;
use crate::types::{Grounding, InteractionOutput};

fn output(kind: &str, text: Option<&str>) -> InteractionOutput {
    InteractionOutput {
        kind: kind.to_string(),
        text: text.map(str::to_string),
    }
}

#[test]
fn endpoint_keeps_versioned_path() {
    let url = interactions_endpoint("https://generativelanguage.googleapis.com/v1beta").unwrap();
    assert_eq!(
        url.as_str(),
        "https://generativelanguage.googleapis.com/v1beta/interactions"
    );
}

#[test]
fn endpoint_strips_trailing_slashes() {
    let url = interactions_endpoint("http://127.0.0.1:9000//").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:9000/interactions");
}

#[test]
fn endpoint_rejects_invalid_url() {
    let err = interactions_endpoint("not a url").unwrap_err();
    assert!(matches!(err, GeminiError::InvalidBaseUrl { .. }));
}

#[test]
fn extract_picks_first_text_output() {
    let response = InteractionResponse {
        id: Some("v1_abc".to_string()),
        outputs: Some(vec![
            output("thought", None),
            output("text", Some("first")),
            output("text", Some("second")),
        ]),
    };

    let result = extract_text_and_id(response).unwrap();
    assert_eq!(result.text, "first");
    assert_eq!(result.interaction_id.unwrap().as_str(), "v1_abc");
}

#[test]
fn extract_fails_without_text_output() {
    let response = InteractionResponse {
        id: Some("v1_abc".to_string()),
        outputs: Some(vec![
            output("thought", None),
            output("google_search_result", None),
            output("text", Some("")),
        ]),
    };

    let err = extract_text_and_id(response).unwrap_err();
    assert!(matches!(err, GeminiError::NoTextOutput));
    assert_eq!(err.to_string(), "No text output from Gemini");
}

#[test]
fn extract_fails_when_outputs_missing() {
    let response = InteractionResponse {
        id: None,
        outputs: None,
    };
    assert!(matches!(
        extract_text_and_id(response),
        Err(GeminiError::NoTextOutput)
    ));
}

#[test]
fn extract_maps_blank_id_to_none() {
    let response = InteractionResponse {
        id: Some(String::new()),
        outputs: Some(vec![output("text", Some("hello"))]),
    };
    assert!(extract_text_and_id(response).unwrap().interaction_id.is_none());
}

#[test]
fn body_omits_optional_fields_for_fresh_dialogue() {
    let request = InteractionRequest::new("query", "system", Grounding::GoogleSearch);
    let body = serde_json::to_value(CreateInteractionBody::new("gemini-flash-latest", &request))
        .unwrap();

    assert_eq!(
        body,
        json!({
            "model": "gemini-flash-latest",
            "input": "query",
            "system_instruction": "system",
            "tools": [{"type": "google_search"}],
            "stream": false
        })
    );
}

#[test]
fn body_includes_previous_id_and_temperature() {
    let previous = InteractionId::new("v1_prev").unwrap();
    let request = InteractionRequest::new("urls", "system", Grounding::UrlContext)
        .continuing(Some(&previous))
        .with_temperature(Some(0.5));
    let body = serde_json::to_value(CreateInteractionBody::new("m", &request)).unwrap();

    assert_eq!(body["previous_interaction_id"], "v1_prev");
    assert_eq!(body["tools"], json!([{"type": "url_context"}]));
    assert_eq!(body["generation_config"]["temperature"], 0.5);
}

#[test]
fn api_error_message_reads_google_envelope() {
    let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
    assert_eq!(api_error_message(body), "API key not valid");
}

#[test]
fn api_error_message_falls_back_to_raw_body() {
    assert_eq!(api_error_message("upstream exploded"), "upstream exploded");
}
