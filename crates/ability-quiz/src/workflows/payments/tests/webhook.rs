use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::assessment::{ResultId, ResultService};
use crate::workflows::payments::lemon_squeezy::LemonSqueezy;
use crate::workflows::payments::provider::PaymentProvider;
use crate::workflows::payments::{payment_router, PaymentGateway};

fn webhook_request(provider: &str, body: Vec<u8>, signature: Option<(&str, &str)>) -> Request<Body> {
    let mut builder = Request::post(format!("/api/v1/payments/{provider}/webhook"))
        .header("content-type", "application/json");
    if let Some((name, value)) = signature {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(body)).unwrap()
}

fn lemon_order_body(event: &str, rid: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "meta": {
            "event_name": event,
            "custom_data": { "rid": rid },
        },
        "data": {
            "type": "orders",
            "id": "98765",
        },
    }))
    .unwrap()
}

fn paddle_transaction_body(event: &str, rid: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "event_type": event,
        "data": {
            "id": "txn_01h",
            "custom_data": { "rid": rid },
        },
    }))
    .unwrap()
}

#[tokio::test]
async fn signed_lemon_order_unlocks_the_result() {
    let (gateway, repository) = build_gateway();
    let router = payment_router(gateway);

    let body = lemon_order_body("order_created", "1");
    let signature = hmac_hex(LEMON_SECRET, &body);
    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            body,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["received"], true);
    assert_eq!(payload["unlocked"], true);

    let record = repository.get(ResultId(1)).expect("record present");
    assert!(record.paid);
    assert!(record.unlocked_at.is_some());
    assert_eq!(record.payment_ref.as_deref(), Some("ls-98765"));
}

#[tokio::test]
async fn replayed_webhook_acknowledges_without_rewriting_state() {
    let (gateway, repository) = build_gateway();
    let router = payment_router(gateway);

    let body = lemon_order_body("order_paid", "1");
    let signature = hmac_hex(LEMON_SECRET, &body);

    let first = router
        .clone()
        .oneshot(webhook_request(
            "lemon-squeezy",
            body.clone(),
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::OK);
    let unlocked_at = repository
        .get(ResultId(1))
        .and_then(|record| record.unlocked_at)
        .expect("first delivery unlocks");

    let replay = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            body,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");
    assert_eq!(replay.status(), StatusCode::OK);
    let payload = read_json_body(replay).await;
    assert_eq!(payload["already_unlocked"], true);

    let record = repository.get(ResultId(1)).expect("record present");
    assert_eq!(record.unlocked_at, Some(unlocked_at));
    assert_eq!(record.payment_ref.as_deref(), Some("ls-98765"));
}

#[tokio::test]
async fn tampered_body_is_rejected_without_side_effects() {
    let (gateway, repository) = build_gateway();
    let router = payment_router(gateway);

    let body = lemon_order_body("order_created", "1");
    let signature = hmac_hex(LEMON_SECRET, &body);
    let tampered = lemon_order_body("order_created", "2");

    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            tampered,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!repository.get(ResultId(1)).expect("record present").paid);
}

#[tokio::test]
async fn missing_signature_header_is_rejected() {
    let (gateway, _) = build_gateway();
    let router = payment_router(gateway);

    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            lemon_order_body("order_created", "1"),
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_webhook_secret_fails_closed() {
    let repository = Arc::new(MemoryResultRepository::default());
    let service = Arc::new(ResultService::new(repository.clone()));
    service.create(complete_answers()).expect("seed record");

    let mut config = payments_config();
    config.lemon_squeezy.webhook_secret = None;
    let router = payment_router(Arc::new(PaymentGateway::new(service, config)));

    let body = lemon_order_body("order_created", "1");
    let signature = hmac_hex(LEMON_SECRET, &body);
    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            body,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!repository.get(ResultId(1)).expect("record present").paid);
}

#[tokio::test]
async fn non_payment_events_are_acknowledged_without_effect() {
    let (gateway, repository) = build_gateway();
    let router = payment_router(gateway);

    let body = lemon_order_body("subscription_created", "1");
    let signature = hmac_hex(LEMON_SECRET, &body);
    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            body,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["received"], true);
    assert!(payload.get("unlocked").is_none());
    assert!(!repository.get(ResultId(1)).expect("record present").paid);
}

#[tokio::test]
async fn payment_event_without_result_id_is_acknowledged() {
    let (gateway, _) = build_gateway();
    let router = payment_router(gateway);

    let body = serde_json::to_vec(&json!({
        "meta": { "event_name": "order_created" },
        "data": { "id": "98765" },
    }))
    .unwrap();
    let signature = hmac_hex(LEMON_SECRET, &body);
    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            body,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "missing result id");
}

#[tokio::test]
async fn payment_event_for_unknown_result_is_acknowledged() {
    let (gateway, _) = build_gateway();
    let router = payment_router(gateway);

    let body = lemon_order_body("order_created", "404404");
    let signature = hmac_hex(LEMON_SECRET, &body);
    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            body,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "unknown result id");
}

#[tokio::test]
async fn signed_but_malformed_body_is_acknowledged() {
    let (gateway, _) = build_gateway();
    let router = payment_router(gateway);

    let body = b"not json at all".to_vec();
    let signature = hmac_hex(LEMON_SECRET, &body);
    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            body,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "malformed payload");
}

#[tokio::test]
async fn storage_failure_asks_the_provider_to_redeliver() {
    let repository = Arc::new(BrokenUnlockRepository::default());
    let service = Arc::new(ResultService::new(repository));
    service.create(complete_answers()).expect("seed record");
    let router = payment_router(Arc::new(PaymentGateway::new(service, payments_config())));

    let body = lemon_order_body("order_created", "1");
    let signature = hmac_hex(LEMON_SECRET, &body);
    let response = router
        .oneshot(webhook_request(
            "lemon-squeezy",
            body,
            Some(("x-signature", &signature)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn signed_paddle_transaction_unlocks_the_result() {
    let (gateway, repository) = build_gateway();
    let router = payment_router(gateway);

    let body = paddle_transaction_body("transaction.completed", "1");
    let header = paddle_signature(PADDLE_SECRET, "1671552777", &body);
    let response = router
        .oneshot(webhook_request(
            "paddle",
            body,
            Some(("paddle-signature", &header)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["unlocked"], true);

    let record = repository.get(ResultId(1)).expect("record present");
    assert!(record.paid);
    assert_eq!(record.payment_ref.as_deref(), Some("txn_01h"));
}

#[tokio::test]
async fn paddle_signature_binds_the_timestamp() {
    let (gateway, repository) = build_gateway();
    let router = payment_router(gateway);

    let body = paddle_transaction_body("transaction.completed", "1");
    let header = paddle_signature(PADDLE_SECRET, "1671552777", &body);
    let shifted = header.replace("ts=1671552777", "ts=1671552778");

    let response = router
        .oneshot(webhook_request(
            "paddle",
            body,
            Some(("paddle-signature", &shifted)),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!repository.get(ResultId(1)).expect("record present").paid);
}

#[tokio::test]
async fn unknown_provider_slug_is_not_found() {
    let (gateway, _) = build_gateway();
    let router = payment_router(gateway);

    let response = router
        .oneshot(webhook_request("stripe", b"{}".to_vec(), None))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn lemon_correlation_id_prefers_meta_custom_data() {
    let payload = json!({
        "meta": { "custom_data": { "rid": "7" } },
        "data": { "attributes": { "custom_data": { "rid": "9" } } },
    });
    assert_eq!(LemonSqueezy.correlation_id(&payload), Some(ResultId(7)));

    let fallback = json!({
        "data": { "attributes": { "checkout_data": { "custom": { "rid": 9 } } } },
    });
    assert_eq!(LemonSqueezy.correlation_id(&fallback), Some(ResultId(9)));

    let zero = json!({ "meta": { "custom_data": { "rid": "0" } } });
    assert_eq!(LemonSqueezy.correlation_id(&zero), None);

    let wrong_shape = json!({ "meta": { "custom_data": { "rid": ["1"] } } });
    assert_eq!(LemonSqueezy.correlation_id(&wrong_shape), None);
}
