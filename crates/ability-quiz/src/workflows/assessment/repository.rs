use chrono::{DateTime, Utc};

use super::domain::{AnswerSet, ResultId, ResultRecord};
use super::scoring::ComputedResult;

/// Storage abstraction so the service module can be exercised in isolation.
/// The store assigns identifiers at insert time.
pub trait ResultRepository: Send + Sync {
    fn insert(
        &self,
        answers: AnswerSet,
        computed: ComputedResult,
    ) -> Result<ResultRecord, RepositoryError>;

    fn fetch(&self, id: ResultId) -> Result<Option<ResultRecord>, RepositoryError>;

    /// Overwrite the contact email. Safe to repeat with the same value.
    fn attach_email(&self, id: ResultId, email: &str) -> Result<(), RepositoryError>;

    /// Conditional unlock: flips `paid` and stamps `unlocked_at` only when
    /// the record is still locked. Replays must converge without mutating
    /// the original timestamp or reference.
    fn unlock(
        &self,
        id: ResultId,
        payment_ref: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<UnlockOutcome, RepositoryError>;
}

/// Distinguishes the first observable unlock transition from replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked,
    AlreadyUnlocked,
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
