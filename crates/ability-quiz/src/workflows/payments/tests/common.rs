use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

use crate::config::PaymentsConfig;
use crate::workflows::assessment::{
    AnswerSet, AnswerValue, ComputedResult, RepositoryError, ResultId, ResultRecord,
    ResultRepository, ResultService, UnlockOutcome,
};
use crate::workflows::payments::PaymentGateway;

pub(super) const LEMON_SECRET: &str = "ls-webhook-secret";
pub(super) const PADDLE_SECRET: &str = "pdl-webhook-secret";

#[derive(Default)]
pub(super) struct MemoryResultRepository {
    records: Mutex<BTreeMap<u64, ResultRecord>>,
    sequence: AtomicU64,
}

impl MemoryResultRepository {
    pub(super) fn get(&self, id: ResultId) -> Option<ResultRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(&id.0)
            .cloned()
    }
}

impl ResultRepository for MemoryResultRepository {
    fn insert(
        &self,
        answers: AnswerSet,
        computed: ComputedResult,
    ) -> Result<ResultRecord, RepositoryError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = ResultRecord {
            id: ResultId(id),
            answers,
            computed_result: computed,
            email: None,
            paid: false,
            unlocked_at: None,
            payment_ref: None,
            created_at: Utc::now(),
        };
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: ResultId) -> Result<Option<ResultRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn attach_email(&self, id: ResultId, email: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(&id.0).ok_or(RepositoryError::NotFound)?;
        record.email = Some(email.to_string());
        Ok(())
    }

    fn unlock(
        &self,
        id: ResultId,
        payment_ref: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<UnlockOutcome, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(&id.0).ok_or(RepositoryError::NotFound)?;
        if record.paid {
            return Ok(UnlockOutcome::AlreadyUnlocked);
        }
        record.paid = true;
        record.unlocked_at = Some(at);
        record.payment_ref = payment_ref.map(str::to_string);
        Ok(UnlockOutcome::Unlocked)
    }
}

/// Repository whose unlock path is broken, for redelivery-path assertions.
#[derive(Default)]
pub(super) struct BrokenUnlockRepository {
    inner: MemoryResultRepository,
}

impl ResultRepository for BrokenUnlockRepository {
    fn insert(
        &self,
        answers: AnswerSet,
        computed: ComputedResult,
    ) -> Result<ResultRecord, RepositoryError> {
        self.inner.insert(answers, computed)
    }

    fn fetch(&self, id: ResultId) -> Result<Option<ResultRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn attach_email(&self, id: ResultId, email: &str) -> Result<(), RepositoryError> {
        self.inner.attach_email(id, email)
    }

    fn unlock(
        &self,
        _id: ResultId,
        _payment_ref: Option<&str>,
        _at: DateTime<Utc>,
    ) -> Result<UnlockOutcome, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}

/// Config with both providers fully credentialed for webhook tests.
pub(super) fn payments_config() -> PaymentsConfig {
    let mut config = PaymentsConfig {
        base_url: Some("https://quiz.example.com".to_string()),
        ..PaymentsConfig::default()
    };
    config.lemon_squeezy.api_key = Some("ls-api-key".to_string());
    config.lemon_squeezy.store_id = Some("11111".to_string());
    config.lemon_squeezy.variant_id = Some("22222".to_string());
    config.lemon_squeezy.webhook_secret = Some(LEMON_SECRET.to_string());
    config.lemon_squeezy.test_mode = true;
    config.paddle.api_key = Some("pdl-api-key".to_string());
    config.paddle.price_id = Some("pri_123".to_string());
    config.paddle.webhook_secret = Some(PADDLE_SECRET.to_string());
    config
}

pub(super) fn complete_answers() -> AnswerSet {
    (1..=16)
        .map(|index| {
            (
                format!("q{index}"),
                AnswerValue::Tag("executor".to_string()),
            )
        })
        .collect()
}

/// Gateway over an in-memory repository, pre-seeded with one locked record.
pub(super) fn build_gateway() -> (
    Arc<PaymentGateway<MemoryResultRepository>>,
    Arc<MemoryResultRepository>,
) {
    let repository = Arc::new(MemoryResultRepository::default());
    let service = Arc::new(ResultService::new(repository.clone()));
    service.create(complete_answers()).expect("seed record");
    let gateway = Arc::new(PaymentGateway::new(service, payments_config()));
    (gateway, repository)
}

pub(super) fn hmac_hex(secret: &str, message: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac accepts any key");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

pub(super) fn paddle_signature(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut message = Vec::new();
    message.extend_from_slice(timestamp.as_bytes());
    message.push(b':');
    message.extend_from_slice(body);
    format!("ts={timestamp};h1={}", hmac_hex(secret, &message))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
