use std::sync::Arc;

use chrono::Utc;

use super::catalog::QuestionCatalog;
use super::domain::{AnswerSet, ResultId, ResultRecord};
use super::repository::{RepositoryError, ResultRepository, UnlockOutcome};
use super::scoring::compute_result;

/// Service coordinating creation, retrieval, and unlock of result records.
/// The scoring engine and payment adapters never touch storage directly.
pub struct ResultService<R> {
    catalog: QuestionCatalog,
    repository: Arc<R>,
}

impl<R> ResultService<R>
where
    R: ResultRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            catalog: QuestionCatalog::standard(),
            repository,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Validate required answers, classify, and persist a locked record.
    /// Nothing is inserted when validation fails.
    pub fn create(&self, answers: AnswerSet) -> Result<ResultRecord, ResultServiceError> {
        let missing: Vec<String> = self
            .catalog
            .required()
            .filter(|question| {
                answers
                    .get(question.id)
                    .map_or(true, |answer| answer.is_missing())
            })
            .map(|question| question.id.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ResultServiceError::MissingAnswers { missing });
        }

        let computed = compute_result(&self.catalog, &answers);
        let record = self.repository.insert(answers, computed)?;
        Ok(record)
    }

    pub fn get(&self, id: ResultId) -> Result<ResultRecord, ResultServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Attach or overwrite the contact email after shape validation.
    pub fn attach_email(&self, id: ResultId, email: &str) -> Result<(), ResultServiceError> {
        let email = email.trim();
        if !plausible_email(email) {
            return Err(ResultServiceError::InvalidEmail);
        }
        self.repository.attach_email(id, email)?;
        Ok(())
    }

    /// Idempotent unlock. The first successful call stamps `unlocked_at`;
    /// replays with the same or a different payment reference succeed
    /// without mutating anything.
    pub fn unlock(
        &self,
        id: ResultId,
        payment_ref: Option<&str>,
    ) -> Result<UnlockOutcome, ResultServiceError> {
        let outcome = self.repository.unlock(id, payment_ref, Utc::now())?;
        Ok(outcome)
    }
}

/// Minimal shape check; deliverability is out of scope.
fn plausible_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Error raised by the result service.
#[derive(Debug, thiserror::Error)]
pub enum ResultServiceError {
    #[error("missing required answers: {}", missing.join(", "))]
    MissingAnswers { missing: Vec<String> },
    #[error("invalid email address")]
    InvalidEmail,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
