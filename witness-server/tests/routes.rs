// End-to-end tests for the HTTP API, driven through the router without a socket.
// Run with: cargo test -p witness-server --test routes

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use witness_server::attestation::AttestationSigner;
use witness_server::routes::create_routes;
use witness_server::services::WitnessConfig;
use witness_server::state::AppState;
use witness_server::types::{Attestation, PrepareWitnessResponse};

const HELLO_WORLD_HEX: &str = "48656c6c6f2c20576f726c6421";
const HELLO_WORLD_DIGEST: &str = "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f";
const TWO_POW_128: &str = "340282366920938463463374607431768211456";
const TWO_POW_128_MINUS_ONE: &str = "340282366920938463463374607431768211455";
const TWO_POW_254: &str = "28948022309329048855892746252171976963317496166410141009864396001978282409984";

fn app() -> Router {
    let state = AppState::new(
        WitnessConfig { max_content_bytes: 1024 },
        AttestationSigner::new(&[9u8; 32]),
    );
    create_routes(state)
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_and_status() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(app(), "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max_content_bytes"], 1024);
    assert_eq!(body["total_witnesses"], 0);
}

#[tokio::test]
async fn prepare_then_verify() {
    let (status, body) = post(app(), "/api/v1/witness/prepare", json!({ "content_hex": HELLO_WORLD_HEX })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["digest"], HELLO_WORLD_DIGEST);
    assert_eq!(body["limbs"]["high"], "297733443949023554348812973902252655525");

    let prepared: PrepareWitnessResponse = serde_json::from_value(body.clone()).unwrap();
    assert!(AttestationSigner::verify_attestation(&prepared.attestation));
    assert_eq!(prepared.request_id, prepared.attestation.id);

    let (status, body) = post(
        app(),
        "/api/v1/witness/verify",
        json!({ "witness": body["witness"], "claimed_digest": HELLO_WORLD_DIGEST }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);

    let mut tampered = prepared.witness;
    tampered.message_word ^= 1;
    let (status, body) = post(
        app(),
        "/api/v1/witness/verify",
        json!({ "witness": tampered, "claimed_digest": HELLO_WORLD_DIGEST }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert!(body["error"].as_str().unwrap().contains("mismatch"));
}

#[tokio::test]
async fn prepare_rejects_oversized_and_bad_hex() {
    let big = "00".repeat(1025);
    let (status, body) = post(app(), "/api/v1/witness/prepare", json!({ "content_hex": big })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "CONTENT_TOO_LARGE");
    assert_eq!(body["details"]["len"], 1025);
    assert_eq!(body["details"]["max"], 1024);

    let (status, body) = post(app(), "/api/v1/witness/prepare", json!({ "content_hex": "xyz" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn digest_codec_roundtrip_and_bounds() {
    let (status, limbs) = post(app(), "/api/v1/codec/digest/pack", json!({ "digest": HELLO_WORLD_DIGEST })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(app(), "/api/v1/codec/digest/unpack", limbs).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["digest"], HELLO_WORLD_DIGEST);

    let (status, body) = post(
        app(),
        "/api/v1/codec/digest/unpack",
        json!({ "high": TWO_POW_128_MINUS_ONE, "low": TWO_POW_128_MINUS_ONE }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["digest"], "ff".repeat(32));

    let (status, body) = post(
        app(),
        "/api/v1/codec/digest/unpack",
        json!({ "high": TWO_POW_128, "low": "0" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn point_codec_roundtrip() {
    let point = json!({ "x": TWO_POW_128, "y": "5" });
    let (status, limbs) = post(app(), "/api/v1/codec/point/pack", point.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(limbs["x_high"], "1");
    assert_eq!(limbs["x_low"], "0");
    assert_eq!(limbs["y_low"], "5");

    let (status, body) = post(app(), "/api/v1/codec/point/unpack", limbs).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, point);
}

#[tokio::test]
async fn counter_operations() {
    let (status, body) = post(app(), "/api/v1/counters/set", json!({ "bank": "0", "id": 5, "value": 1022 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full"], false);

    let (status, body) = post(app(), "/api/v1/counters/increment", json!({ "bank": body["bank"], "id": 5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], 1023);
    assert_eq!(body["full"], true);
    let bank = body["bank"].clone();

    let (status, body) = post(app(), "/api/v1/counters/increment", json!({ "bank": bank, "id": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, body) = post(app(), "/api/v1/counters/increment", json!({ "bank": bank, "id": 25 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "COUNTER_OUT_OF_RANGE");

    let (status, body) = post(app(), "/api/v1/counters/query", json!({ "bank": bank })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1023);
    assert_eq!(body["max_index"], 5);
    assert_eq!(body["counters"][5], 1023);
    assert_eq!(body["counters"][4], 0);
}

#[tokio::test]
async fn body_values_rejected_while_parsing_are_validation_errors() {
    let (status, body) = post(app(), "/api/v1/counters/query", json!({ "bank": TWO_POW_254 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("2^254"));

    let (status, body) = post(app(), "/api/v1/codec/digest/pack", json!({ "digest": "zz" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, body) = post(
        app(),
        "/api/v1/witness/verify",
        json!({ "witness": {}, "claimed_digest": HELLO_WORLD_DIGEST }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn limbs_must_be_plain_decimal() {
    let (status, body) = post(app(), "/api/v1/codec/digest/unpack", json!({ "high": "1_0", "low": "+5" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, body) = post(app(), "/api/v1/counters/query", json!({ "bank": "-1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn malformed_json_is_invalid_input() {
    let (status, body) = post_raw(app(), "/api/v1/counters/query", "{\"bank\": ".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[test]
fn attestation_json_roundtrip() {
    let signer = AttestationSigner::new(&[3u8; 32]);
    let attestation = signer.create_attestation(HELLO_WORLD_DIGEST.parse().unwrap());
    let json = serde_json::to_string(&attestation).unwrap();
    let back: Attestation = serde_json::from_str(&json).unwrap();
    tokio_test::assert_ok!(serde_json::to_value(&back));
    assert!(AttestationSigner::verify_attestation(&back));
}
