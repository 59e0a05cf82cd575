use axum::http::HeaderMap;
use serde_json::{json, Value};

use crate::config::PaymentsConfig;
use crate::workflows::assessment::ResultId;

use super::provider::{
    header_str, id_from_value, require, verify_hmac_sha256, CheckoutRequest, PaymentError,
    PaymentProvider, WebhookEvent,
};

const TRANSACTIONS_URL: &str = "https://api.paddle.com/transactions";
const SIGNATURE_HEADER: &str = "paddle-signature";

const PAYMENT_SUCCESS_EVENTS: [&str; 2] = ["transaction.completed", "transaction.paid"];

/// Paddle Billing transactions with `ts=...;h1=...` signed webhooks.
///
/// The signed message is `"{ts}:{raw_body}"`; the result id rides in
/// `custom_data.rid` on the transaction.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaddleBilling;

impl PaymentProvider for PaddleBilling {
    fn slug(&self) -> &'static str {
        "paddle"
    }

    fn checkout_request(
        &self,
        result_id: ResultId,
        config: &PaymentsConfig,
    ) -> Result<CheckoutRequest, PaymentError> {
        let api_key = require(&config.paddle.api_key, "PADDLE_API_KEY")?;
        let price_id = require(&config.paddle.price_id, "PADDLE_PRICE_ID")?;
        let base_url = require(&config.base_url, "APP_BASE_URL")?;

        let body = json!({
            "items": [
                { "price_id": price_id, "quantity": 1 },
            ],
            "custom_data": {
                "rid": result_id.to_string(),
            },
            "checkout": {
                "url": format!("{base_url}/unlock/success?rid={result_id}"),
            },
        });

        Ok(CheckoutRequest {
            url: TRANSACTIONS_URL.to_string(),
            headers: vec![
                ("authorization", format!("Bearer {api_key}")),
                ("content-type", "application/json".to_string()),
            ],
            body,
        })
    }

    fn checkout_url(&self, response: &Value) -> Result<String, PaymentError> {
        response
            .pointer("/data/checkout/url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(PaymentError::MissingCheckoutUrl)
    }

    fn verify(
        &self,
        raw_body: &[u8],
        headers: &HeaderMap,
        config: &PaymentsConfig,
    ) -> Result<(), PaymentError> {
        let secret = require(&config.paddle.webhook_secret, "PADDLE_WEBHOOK_SECRET")?;
        let header =
            header_str(headers, SIGNATURE_HEADER).ok_or(PaymentError::MissingSignature)?;

        let (timestamp, signature) =
            parse_signature_header(header).ok_or(PaymentError::InvalidSignature)?;

        let mut message = Vec::with_capacity(timestamp.len() + 1 + raw_body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.push(b':');
        message.extend_from_slice(raw_body);

        verify_hmac_sha256(secret, &message, signature)
    }

    fn classify(&self, payload: &Value) -> WebhookEvent {
        let event = payload
            .get("event_type")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if PAYMENT_SUCCESS_EVENTS.contains(&event) {
            WebhookEvent::PaymentSucceeded
        } else {
            WebhookEvent::Ignored
        }
    }

    fn correlation_id(&self, payload: &Value) -> Option<ResultId> {
        ["/data/custom_data/rid", "/custom_data/rid"]
            .iter()
            .find_map(|pointer| payload.pointer(pointer).and_then(id_from_value))
    }

    fn transaction_ref(&self, payload: &Value) -> Option<String> {
        payload
            .pointer("/data/id")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Split `ts=1671552777;h1=abcdef...` into its timestamp and signature.
fn parse_signature_header(header: &str) -> Option<(&str, &str)> {
    let mut timestamp = None;
    let mut signature = None;

    for pair in header.split(';') {
        match pair.trim().split_once('=') {
            Some(("ts", value)) => timestamp = Some(value),
            Some(("h1", value)) => signature = Some(value),
            _ => {}
        }
    }

    timestamp.zip(signature)
}
