use serde_json::Value;

use crate::config::PaymentsConfig;
use crate::workflows::assessment::ResultId;

use super::provider::{PaymentError, PaymentProvider};

/// Executes provider checkout requests. The request itself is built by the
/// provider so this stays a thin transport layer.
pub struct CheckoutService {
    http: reqwest::Client,
}

impl CheckoutService {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Create a hosted checkout for the given result and return its URL.
    /// Missing configuration fails before any network traffic.
    pub async fn create(
        &self,
        provider: &dyn PaymentProvider,
        result_id: ResultId,
        config: &PaymentsConfig,
    ) -> Result<String, PaymentError> {
        let request = provider.checkout_request(result_id, config)?;
        let body = serde_json::to_vec(&request.body)?;

        let mut builder = self.http.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.body(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let payload: Value =
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()));

        if !status.is_success() {
            return Err(PaymentError::Upstream {
                status: status.as_u16(),
                detail: payload.to_string(),
            });
        }

        provider.checkout_url(&payload)
    }
}

impl Default for CheckoutService {
    fn default() -> Self {
        Self::new()
    }
}
