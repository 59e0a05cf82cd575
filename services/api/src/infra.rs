use ability_quiz::workflows::assessment::{
    AnswerSet, ComputedResult, RepositoryError, ResultId, ResultRecord, ResultRepository,
    UnlockOutcome,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local result store. Identifiers are sequential positive integers
/// assigned on insert.
#[derive(Default)]
pub(crate) struct InMemoryResultRepository {
    records: Mutex<HashMap<u64, ResultRecord>>,
    sequence: AtomicU64,
}

impl ResultRepository for InMemoryResultRepository {
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
