//! Tests for /api/sample

mod common;

use axum::http::StatusCode;
use common::fixtures::{colors, encode, solid_rgba, split_rgba};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

/// 20x10 buffer: white on the left, black on the right
fn two_tone() -> String {
    encode(&split_rgba(20, 10, colors::WHITE, colors::BLACK_WOOL))
}

fn assert_close(hex: &serde_json::Value, rgb: [u8; 3]) {
    let hex = hex.as_str().unwrap();
    let got = [&hex[1..3], &hex[3..5], &hex[5..7]]
        .map(|c| u8::from_str_radix(c, 16).unwrap());
    for (want, got) in rgb.iter().zip(got) {
        assert!((*want as i32 - got as i32).abs() <= 1, "{hex} vs {rgb:?}");
    }
}

#[tokio::test]
async fn test_sample_whole_buffer() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 4,
                "height": 4,
                "data": encode(&solid_rgba(4, 4, colors::RED_WOOL)),
                "tag": "block",
            }),
        )
        .await;

    assert_ok(&response);
    assert_ranked(&response, "matches");
    let json: serde_json::Value = response.json();
    assert_eq!(json["pixel_count"], 16);
    assert_eq!(
        json["region"],
        json!({ "left": 0, "top": 0, "width": 4, "height": 4 })
    );
    assert_close(&json["color"]["hex"], colors::RED_WOOL);
    assert_eq!(json["matches"][0]["id"], "red_wool");
    assert_all_tagged(&response, "matches", "block");
}

#[tokio::test]
async fn test_sample_rect() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 20,
                "height": 10,
                "data": two_tone(),
                "rect": { "left": 0, "top": 0, "width": 10, "height": 10 },
                "tag": "block",
            }),
        )
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["pixel_count"], 100);
    assert_close(&json["color"]["hex"], colors::WHITE);
    assert_eq!(json["matches"][0]["id"], "white_wool");
}

#[tokio::test]
async fn test_sample_point_uses_pointer_box() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 20,
                "height": 10,
                "data": two_tone(),
                "point": { "x": 15, "y": 5 },
                "tag": "block",
            }),
        )
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["region"],
        json!({ "left": 10, "top": 0, "width": 10, "height": 10 })
    );
    assert_close(&json["color"]["hex"], colors::BLACK_WOOL);
    assert_eq!(json["matches"][0]["id"], "black_wool");
}

#[tokio::test]
async fn test_sample_drag() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 20,
                "height": 10,
                "data": two_tone(),
                "drag": { "x0": 19, "y0": 9, "x1": 12, "y1": 2 },
            }),
        )
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["region"],
        json!({ "left": 12, "top": 2, "width": 7, "height": 7 })
    );
    assert_eq!(json["pixel_count"], 49);
    assert_close(&json["color"]["hex"], colors::BLACK_WOOL);
}

#[tokio::test]
async fn test_small_drag_samples_pointer_box() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 20,
                "height": 10,
                "data": two_tone(),
                "drag": { "x0": 2, "y0": 2, "x1": 4, "y1": 4 },
            }),
        )
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["region"],
        json!({ "left": 0, "top": 0, "width": 10, "height": 10 })
    );
    assert_close(&json["color"]["hex"], colors::WHITE);
}

#[tokio::test]
async fn test_sample_rgb_format() {
    let app = TestApp::new();
    let stone = [0x7D, 0x7D, 0x7D];
    let data: Vec<u8> = stone.iter().chain(stone.iter()).copied().collect();

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 2,
                "height": 1,
                "format": "rgb",
                "data": encode(&data),
                "tag": "block",
            }),
        )
        .await;

    assert_ok(&response);
    assert_eq!(response.ids("matches")[0], "stone");
}

#[tokio::test]
async fn test_transparent_region_is_unprocessable() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/sample",
            &json!({ "width": 2, "height": 2, "data": encode(&[0u8; 16]) }),
        )
        .await;

    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY, "no pixels");
}

#[tokio::test]
async fn test_sample_errors() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/sample",
            &json!({ "width": 3, "height": 3, "data": encode(&[255u8; 16]) }),
        )
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "expected 36");

    let response = app
        .post_json(
            "/api/sample",
            &json!({ "width": 1, "height": 1, "data": "not base64!" }),
        )
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "base64");

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 20,
                "height": 10,
                "data": two_tone(),
                "rect": { "left": 0, "top": 0, "width": 1, "height": 1 },
                "point": { "x": 1, "y": 1 },
            }),
        )
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "at most one");

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 20,
                "height": 10,
                "data": two_tone(),
                "rect": { "left": 30, "top": 0, "width": 5, "height": 5 },
            }),
        )
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "outside");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut state = TestApp::create_state();
    let mut config = (*state.config).clone();
    config.sampling.max_body_bytes = 1024;
    state.config = Arc::new(config);
    let app = TestApp::from_state(state);

    let response = app
        .post_json(
            "/api/sample",
            &json!({
                "width": 32,
                "height": 32,
                "data": encode(&solid_rgba(32, 32, colors::WHITE)),
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
}
