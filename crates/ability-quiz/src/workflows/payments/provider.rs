use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

use crate::config::PaymentsConfig;
use crate::workflows::assessment::ResultId;

type HmacSha256 = Hmac<Sha256>;

/// Classification of an inbound webhook event. Only payment-success events
/// trigger unlock logic; everything else is acknowledged without effect so
/// senders are not led to retry intentionally ignored events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEvent {
    PaymentSucceeded,
    Ignored,
}

/// A provider checkout call, fully built but not yet executed. Keeping the
/// construction pure lets tests assert the exact request shape offline.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

/// Capability interface implemented once per payment provider: checkout
/// construction, webhook authentication, event classification, and
/// correlation-id recovery.
pub trait PaymentProvider: Send + Sync {
    /// URL path segment identifying the provider.
    fn slug(&self) -> &'static str;

    fn checkout_request(
        &self,
        result_id: ResultId,
        config: &PaymentsConfig,
    ) -> Result<CheckoutRequest, PaymentError>;

    /// Recover the hosted checkout URL from the provider's response body.
    fn checkout_url(&self, response: &Value) -> Result<String, PaymentError>;

    /// Authenticate a raw webhook body against its signature header. Fails
    /// closed: missing header, missing secret, or mismatch all reject.
    fn verify(
        &self,
        raw_body: &[u8],
        headers: &HeaderMap,
        config: &PaymentsConfig,
    ) -> Result<(), PaymentError>;

    fn classify(&self, payload: &Value) -> WebhookEvent;

    /// Recover the result identifier from the payload, trying the provider's
    /// known locations in a fixed priority order.
    fn correlation_id(&self, payload: &Value) -> Option<ResultId>;

    /// Provider transaction identifier, recorded for idempotency audits.
    fn transaction_ref(&self, payload: &Value) -> Option<String>;
}

/// Error raised by checkout construction, webhook verification, or the
/// upstream checkout call.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("missing payment configuration: {key}")]
    MissingConfiguration { key: &'static str },
    #[error("missing webhook signature header")]
    MissingSignature,
    #[error("webhook signature mismatch")]
    InvalidSignature,
    #[error("provider rejected checkout (status {status}): {detail}")]
    Upstream { status: u16, detail: String },
    #[error("checkout transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("checkout response missing hosted URL")]
    MissingCheckoutUrl,
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub(crate) fn require<'a>(
    value: &'a Option<String>,
    key: &'static str,
) -> Result<&'a str, PaymentError> {
    value
        .as_deref()
        .ok_or(PaymentError::MissingConfiguration { key })
}

/// Constant-time HMAC-SHA256 check of a hex-encoded signature.
pub(crate) fn verify_hmac_sha256(
    secret: &str,
    message: &[u8],
    signature_hex: &str,
) -> Result<(), PaymentError> {
    let signature =
        hex::decode(signature_hex.trim()).map_err(|_| PaymentError::InvalidSignature)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| PaymentError::InvalidSignature)?;
    mac.update(message);
    mac.verify_slice(&signature)
        .map_err(|_| PaymentError::InvalidSignature)
}

/// Providers echo the correlation id back as either a JSON string or a
/// number; both shapes map to the canonical positive-integer identifier.
pub(crate) fn id_from_value(value: &Value) -> Option<ResultId> {
    match value {
        Value::String(raw) => ResultId::parse(raw),
        Value::Number(number) => number
            .as_u64()
            .filter(|id| *id > 0)
            .map(ResultId),
        _ => None,
    }
}

pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}
