use serde_json::json;

use super::*;

#[test]
fn extracts_object_wrapped_in_prose_and_fences() {
    let text = "Here is the result:\n```json\n{\"urls\": [\"https://a.example\"]}\n```\nDone.";
    let value = normalize_json(text).unwrap();
    assert_eq!(value, json!({"urls": ["https://a.example"]}));
}

#[test]
fn missing_braces_is_json_not_found() {
    let err = normalize_json("I could not find any information.").unwrap_err();
    assert!(matches!(err, NormalizeError::JsonNotFound));
    assert_eq!(err.to_string(), "JSON not found in response");
}

#[test]
fn closing_brace_before_opening_is_json_not_found() {
    assert!(matches!(
        normalize_json("} nothing here {"),
        Err(NormalizeError::JsonNotFound)
    ));
}

#[test]
fn span_is_greedy() {
    assert_eq!(json_span("a {x} b {y} c"), Some("{x} b {y}"));
}

#[test]
fn greedy_span_keeps_first_object() {
    let value = normalize_json(r#"{"a": 1} and also {"b": 2}"#).unwrap();
    assert_eq!(value, json!({"a": 1}));
}

#[test]
fn removes_trailing_commas() {
    let value = normalize_json(r#"{"awards": ["A", "B",], "certifications": [],}"#).unwrap();
    assert_eq!(value, json!({"awards": ["A", "B"], "certifications": []}));
}

#[test]
fn quotes_unquoted_keys_and_converts_single_quotes() {
    let value = normalize_json("{foundedYear: 1997, 'brandConcept': 'Holistic beauty'}").unwrap();
    assert_eq!(
        value,
        json!({"foundedYear": 1997, "brandConcept": "Holistic beauty"})
    );
}

#[test]
fn inserts_missing_commas() {
    let value = normalize_json("{\"a\": 1\n\"b\": [\"x\" \"y\"]\n\"c\": {\"d\": true}}").unwrap();
    assert_eq!(value, json!({"a": 1, "b": ["x", "y"], "c": {"d": true}}));
}

#[test]
fn maps_python_constants() {
    let value = normalize_json("{\"a\": None, \"b\": True, \"c\": False}").unwrap();
    assert_eq!(value, json!({"a": null, "b": true, "c": false}));
}

#[test]
fn strips_comments() {
    let text = "{\n  // the launch year\n  \"foundedYear\": 1997, /* guessed */ \"country\": \"Korea\"\n}";
    let value = normalize_json(text).unwrap();
    assert_eq!(value, json!({"foundedYear": 1997, "country": "Korea"}));
}

#[test]
fn closes_truncated_containers() {
    let value = normalize_json(r#"{"a": {"b": [1, 2}"#).unwrap();
    assert_eq!(value, json!({"a": {"b": [1, 2]}}));
}

#[test]
fn closes_truncated_string() {
    let value = normalize_json(r#"{"brands": [{"brandName": "X", "country": "Kor}"#).unwrap();
    assert_eq!(value, json!({"brands": [{"brandName": "X", "country": "Kor}"}]}));
}

#[test]
fn dangling_key_becomes_null() {
    let value = normalize_json(r#"{"a": 1, "b": }"#).unwrap();
    assert_eq!(value, json!({"a": 1, "b": null}));
}

#[test]
fn keeps_unescaped_inner_quotes() {
    let value = normalize_json(r#"{"event": "Launched the "Herbal" line", "year": 2001}"#).unwrap();
    assert_eq!(
        value,
        json!({"event": "Launched the \"Herbal\" line", "year": 2001})
    );
}

#[test]
fn escapes_raw_newlines_in_strings() {
    let value = normalize_json("{\"brandOverview\": \"line one\nline two\"}").unwrap();
    assert_eq!(value, json!({"brandOverview": "line one\nline two"}));
}

#[test]
fn drops_ellipsis_placeholders() {
    let text = "{\"urls\": [\n \"https://example.com/about\",\n \"https://example.com/history\",\n ...\n]}";
    let value = normalize_json(text).unwrap();
    assert_eq!(
        value,
        json!({"urls": ["https://example.com/about", "https://example.com/history"]})
    );
}

#[test]
fn number_glued_to_text_becomes_string() {
    let value = normalize_json("{\"foundedYear\": 1997년}").unwrap();
    assert_eq!(value, json!({"foundedYear": "1997년"}));
}

#[test]
fn unquoted_string_value_is_quoted() {
    let value = normalize_json("{\"manufacturingType\": OEM, \"homepage\": https://a.example/x}").unwrap();
    assert_eq!(
        value,
        json!({"manufacturingType": "OEM", "homepage": "https://a.example/x"})
    );
}

#[test]
fn preserves_non_ascii_text() {
    let value = normalize_json(r#"{"name": "설화수", "emoji": "😀",}"#).unwrap();
    assert_eq!(value, json!({"name": "설화수", "emoji": "😀"}));
}

#[test]
fn decodes_unicode_escapes_and_surrogate_pairs() {
    let value = normalize_json(r"{'name': '\uc124\ud654\uc218', 'emoji': '\ud83d\ude00'}").unwrap();
    assert_eq!(value, json!({"name": "설화수", "emoji": "😀"}));
}

#[test]
fn valid_json_passes_through_untouched() {
    let text = r#"{"history": [{"year": 1997, "event": "a, b: \"c\""}]}"#;
    let value = normalize_json(text).unwrap();
    assert_eq!(value, json!({"history": [{"year": 1997, "event": "a, b: \"c\""}]}));
}

#[test]
fn repair_output_is_strict_json() {
    assert_eq!(repair_json("{a: 'b', c: [1, 2,],}"), r#"{"a":"b","c":[1,2]}"#);
}

#[test]
fn decode_json_reports_shape_mismatch() {
    #[derive(Debug, serde::Deserialize)]
    struct Urls {
        #[allow(dead_code)]
        urls: Vec<String>,
    }

    let err = decode_json::<Urls>(r#"{"urls": "not a list"}"#, "url inventory").unwrap_err();
    assert!(matches!(err, ResearchError::Deserialize { ref context, .. } if context == "url inventory"));
}

#[test]
fn decode_json_surfaces_json_not_found() {
    let err = decode_json::<serde_json::Value>("no json", "brand profile").unwrap_err();
    assert_eq!(err.to_string(), "JSON not found in response");
}

#[test]
fn missing_value_before_comma_becomes_null() {
    let value =
        normalize_json(r#"{"foundedYear": , "brandConcept": "Herbal", "country": "KR",}"#).unwrap();
    assert_eq!(
        value,
        json!({"foundedYear": null, "brandConcept": "Herbal", "country": "KR"})
    );
}

#[test]
fn key_without_colon_before_comma_becomes_null() {
    let value = normalize_json(r#"{"awards", "country": "KR"}"#).unwrap();
    assert_eq!(value, json!({"awards": null, "country": "KR"}));
}

#[test]
fn leading_dot_numbers_keep_their_fraction() {
    let value = normalize_json("{'a': .5, 'b': -.25, 'c': 1,}").unwrap();
    assert_eq!(value, json!({"a": 0.5, "b": -0.25, "c": 1}));
}
