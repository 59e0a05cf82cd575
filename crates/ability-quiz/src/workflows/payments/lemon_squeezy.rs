use axum::http::HeaderMap;
use serde_json::{json, Value};

use crate::config::PaymentsConfig;
use crate::workflows::assessment::ResultId;

use super::provider::{
    header_str, id_from_value, require, verify_hmac_sha256, CheckoutRequest, PaymentError,
    PaymentProvider, WebhookEvent,
};

const CHECKOUTS_URL: &str = "https://api.lemonsqueezy.com/v1/checkouts";
const SIGNATURE_HEADER: &str = "x-signature";

/// One-time order events that confirm payment for this product.
const PAYMENT_SUCCESS_EVENTS: [&str; 3] = ["order_created", "order_paid", "checkout_completed"];

/// Lemon Squeezy hosted checkout plus HMAC-signed webhooks.
///
/// The result id travels as `checkout_data.custom.rid` and is echoed back in
/// the webhook under `meta.custom_data` (with two legacy fallback spots).
#[derive(Debug, Default, Clone, Copy)]
pub struct LemonSqueezy;

impl PaymentProvider for LemonSqueezy {
    fn slug(&self) -> &'static str {
        "lemon-squeezy"
    }

    fn checkout_request(
        &self,
        result_id: ResultId,
        config: &PaymentsConfig,
    ) -> Result<CheckoutRequest, PaymentError> {
        let api_key = require(&config.lemon_squeezy.api_key, "LEMONSQUEEZY_API_KEY")?;
        let store_id = require(&config.lemon_squeezy.store_id, "LEMONSQUEEZY_STORE_ID")?;
        let variant_id = require(&config.lemon_squeezy.variant_id, "LEMONSQUEEZY_VARIANT_ID")?;
        let base_url = require(&config.base_url, "APP_BASE_URL")?;

        let redirect_url = format!("{base_url}/results?rid={result_id}");

        let body = json!({
            "data": {
                "type": "checkouts",
                "attributes": {
                    "product_options": {
                        "redirect_url": redirect_url,
                    },
                    "checkout_data": {
                        "custom": {
                            "rid": result_id.to_string(),
                        },
                    },
                    "test_mode": config.lemon_squeezy.test_mode,
                },
                "relationships": {
                    "store": { "data": { "type": "stores", "id": store_id } },
                    "variant": { "data": { "type": "variants", "id": variant_id } },
                },
            },
        });

        Ok(CheckoutRequest {
            url: CHECKOUTS_URL.to_string(),
            headers: vec![
                ("authorization", format!("Bearer {api_key}")),
                ("accept", "application/vnd.api+json".to_string()),
                ("content-type", "application/vnd.api+json".to_string()),
            ],
            body,
        })
    }

    fn checkout_url(&self, response: &Value) -> Result<String, PaymentError> {
        response
            .pointer("/data/attributes/url")
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
        let secret = require(
            &config.lemon_squeezy.webhook_secret,
            "LEMONSQUEEZY_WEBHOOK_SECRET",
        )?;
        let signature =
            header_str(headers, SIGNATURE_HEADER).ok_or(PaymentError::MissingSignature)?;

        verify_hmac_sha256(secret, raw_body, signature)
    }

    fn classify(&self, payload: &Value) -> WebhookEvent {
        let event = payload
            .pointer("/meta/event_name")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if PAYMENT_SUCCESS_EVENTS.contains(&event) {
            WebhookEvent::PaymentSucceeded
        } else {
            WebhookEvent::Ignored
        }
    }

    fn correlation_id(&self, payload: &Value) -> Option<ResultId> {
        // Fixed priority order over the shapes Lemon Squeezy has used.
        [
            "/meta/custom_data/rid",
            "/data/attributes/custom_data/rid",
            "/data/attributes/checkout_data/custom/rid",
        ]
        .iter()
        .find_map(|pointer| payload.pointer(pointer).and_then(id_from_value))
    }

    fn transaction_ref(&self, payload: &Value) -> Option<String> {
        payload
            .pointer("/data/id")
            .and_then(Value::as_str)
            .map(|id| format!("ls-{id}"))
    }
}
