use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::PaymentsConfig;
use crate::workflows::assessment::{
    RepositoryError, ResultId, ResultRepository, ResultService, ResultServiceError, UnlockOutcome,
};

use super::checkout::CheckoutService;
use super::lemon_squeezy::LemonSqueezy;
use super::paddle::PaddleBilling;
use super::provider::{PaymentError, PaymentProvider, WebhookEvent};

/// Glue between the configured payment providers and the result service.
/// Webhook handling never touches storage except through `unlock`.
pub struct PaymentGateway<R> {
    providers: Vec<Arc<dyn PaymentProvider>>,
    checkout: CheckoutService,
    service: Arc<ResultService<R>>,
    config: PaymentsConfig,
}

impl<R> PaymentGateway<R>
where
    R: ResultRepository + 'static,
{
    pub fn new(service: Arc<ResultService<R>>, config: PaymentsConfig) -> Self {
        Self {
            providers: vec![Arc::new(LemonSqueezy), Arc::new(PaddleBilling)],
            checkout: CheckoutService::new(),
            service,
            config,
        }
    }

    fn provider(&self, slug: &str) -> Option<&Arc<dyn PaymentProvider>> {
        self.providers
            .iter()
            .find(|provider| provider.slug() == slug)
    }
}

/// Router builder exposing checkout creation and webhook receipt per
/// provider slug.
pub fn payment_router<R>(gateway: Arc<PaymentGateway<R>>) -> Router
where
    R: ResultRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/payments/:provider/checkout",
            post(checkout_handler::<R>),
        )
        .route(
            "/api/v1/payments/:provider/webhook",
            post(webhook_handler::<R>),
        )
        .with_state(gateway)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutPayload {
    pub(crate) result_id: ResultId,
}

pub(crate) async fn checkout_handler<R>(
    State(gateway): State<Arc<PaymentGateway<R>>>,
    Path(provider): Path<String>,
    axum::Json(payload): axum::Json<CheckoutPayload>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let Some(provider) = gateway.provider(&provider) else {
        return unknown_provider_response(&provider);
    };

    if payload.result_id.0 == 0 {
        let body = json!({ "error": "invalid result id" });
        return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
    }

    match gateway
        .checkout
        .create(provider.as_ref(), payload.result_id, &gateway.config)
        .await
    {
        Ok(checkout_url) => {
            let body = json!({ "checkout_url": checkout_url });
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(PaymentError::MissingConfiguration { key }) => {
            tracing::error!(key, "payment configuration incomplete");
            let body = json!({ "error": "payment configuration error" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
        Err(error) => {
            tracing::error!(%error, provider = provider.slug(), "checkout creation failed");
            let body = json!({ "error": "failed to create checkout" });
            (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response()
        }
    }
}

pub(crate) async fn webhook_handler<R>(
    State(gateway): State<Arc<PaymentGateway<R>>>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    R: ResultRepository + 'static,
{
    let Some(provider) = gateway.provider(&provider) else {
        return unknown_provider_response(&provider);
    };
    let provider = provider.as_ref();

    // Authenticate before reading anything out of the payload. Missing
    // secret configuration fails closed rather than open.
    if let Err(error) = provider.verify(&body, &headers, &gateway.config) {
        tracing::warn!(%error, provider = provider.slug(), "webhook rejected");
        let payload = json!({ "error": "invalid signature" });
        return (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response();
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(error) => {
            // Signed but unparseable; retries would not help.
            tracing::warn!(%error, provider = provider.slug(), "webhook body not JSON");
            return acknowledge(json!({ "received": true, "error": "malformed payload" }));
        }
    };

    if provider.classify(&payload) != WebhookEvent::PaymentSucceeded {
        return acknowledge(json!({ "received": true }));
    }

    let Some(result_id) = provider.correlation_id(&payload) else {
        tracing::warn!(
            provider = provider.slug(),
            "payment webhook missing result id"
        );
        return acknowledge(json!({ "received": true, "error": "missing result id" }));
    };

    let payment_ref = provider.transaction_ref(&payload);

    match gateway
        .service
        .unlock(result_id, payment_ref.as_deref())
    {
        Ok(UnlockOutcome::Unlocked) => {
            tracing::info!(%result_id, provider = provider.slug(), "result unlocked");
            acknowledge(json!({ "received": true, "unlocked": true }))
        }
        Ok(UnlockOutcome::AlreadyUnlocked) => {
            acknowledge(json!({ "received": true, "already_unlocked": true }))
        }
        Err(ResultServiceError::Repository(RepositoryError::NotFound)) => {
            tracing::warn!(%result_id, provider = provider.slug(), "webhook for unknown result");
            acknowledge(json!({ "received": true, "error": "unknown result id" }))
        }
        Err(error) => {
            // Surface storage failures so the provider redelivers.
            tracing::error!(%error, %result_id, "unlock failed");
            let payload = json!({ "error": "failed to unlock result" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn acknowledge(payload: Value) -> Response {
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn unknown_provider_response(slug: &str) -> Response {
    let payload = json!({ "error": format!("unknown payment provider '{slug}'") });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}
