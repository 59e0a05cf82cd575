use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::workflows::assessment::domain::{AnswerSet, AnswerValue, ResultId, ResultRecord};
use crate::workflows::assessment::repository::{
    RepositoryError, ResultRepository, UnlockOutcome,
};
use crate::workflows::assessment::scoring::ComputedResult;
use crate::workflows::assessment::service::ResultService;

#[derive(Default)]
pub(super) struct MemoryResultRepository {
    records: Mutex<BTreeMap<u64, ResultRecord>>,
    sequence: AtomicU64,
}

impl MemoryResultRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }

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

/// Repository that fails every operation, for error-path assertions.
pub(super) struct UnavailableRepository;

impl ResultRepository for UnavailableRepository {
    fn insert(
        &self,
        _answers: AnswerSet,
        _computed: ComputedResult,
    ) -> Result<ResultRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: ResultId) -> Result<Option<ResultRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn attach_email(&self, _id: ResultId, _email: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn unlock(
        &self,
        _id: ResultId,
        _payment_ref: Option<&str>,
        _at: DateTime<Utc>,
    ) -> Result<UnlockOutcome, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<ResultService<MemoryResultRepository>>,
    Arc<MemoryResultRepository>,
) {
    let repository = Arc::new(MemoryResultRepository::default());
    let service = Arc::new(ResultService::new(repository.clone()));
    (service, repository)
}

pub(super) fn answers(entries: &[(&str, &str)]) -> AnswerSet {
    entries
        .iter()
        .map(|(question, tag)| (question.to_string(), AnswerValue::Tag(tag.to_string())))
        .collect()
}

/// All sixteen questions answered with the same tag.
pub(super) fn uniform_answers(tag: &str) -> AnswerSet {
    (1..=16)
        .map(|index| {
            (
                format!("q{index}"),
                AnswerValue::Tag(tag.to_string()),
            )
        })
        .collect()
}

/// A complete, mixed answer set that still produces a clear primary.
pub(super) fn complete_answers() -> AnswerSet {
    let mut set = uniform_answers("executor");
    set.insert("q5".to_string(), AnswerValue::Tag("connector".to_string()));
    set.insert("q9".to_string(), AnswerValue::Tag("strategist".to_string()));
    set.insert("q15".to_string(), AnswerValue::Tag("optimizer".to_string()));
    set
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
