//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert JSON response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
}

/// Assert an error response: HTTP status, JSON status and message fragment
pub fn assert_error(response: &TestResponse, expected: StatusCode, fragment: &str) {
    assert_status(response, expected);
    assert_json_status(response, expected.as_u16());
    let json: serde_json::Value = response.json();
    let message = json["error"].as_str().unwrap_or_default();
    assert!(
        message.contains(fragment),
        "Expected error containing {fragment:?}, got {message:?}"
    );
}

/// Assert every entry of a ranked list carries `tag`
pub fn assert_all_tagged(response: &TestResponse, field: &str, tag: &str) {
    let json: serde_json::Value = response.json();
    for entry in json[field].as_array().expect("Expected array") {
        let tags: Vec<&str> = entry["tags"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t.as_str())
            .collect();
        assert!(tags.contains(&tag), "{} lacks tag {tag}: {tags:?}", entry["id"]);
    }
}

/// Assert no entry of a ranked list carries `tag`
pub fn assert_none_tagged(response: &TestResponse, field: &str, tag: &str) {
    let json: serde_json::Value = response.json();
    for entry in json[field].as_array().expect("Expected array") {
        let tagged = entry["tags"]
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t.as_str() == Some(tag));
        assert!(!tagged, "{} should not carry tag {tag}", entry["id"]);
    }
}

/// Assert a ranked list is sorted by distance with consecutive ranks
pub fn assert_ranked(response: &TestResponse, field: &str) {
    let json: serde_json::Value = response.json();
    let entries = json[field].as_array().expect("Expected array");
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry["rank"].as_u64(), Some(i as u64));
    }
    for pair in entries.windows(2) {
        let (a, b) = (
            pair[0]["distance"].as_f64().unwrap(),
            pair[1]["distance"].as_f64().unwrap(),
        );
        assert!(a <= b, "Distances out of order: {a} > {b}");
    }
}
