//! Questionnaire catalog, scoring engine, and result lifecycle.
//!
//! The catalog and prescriptive content tables are static, read-only data.
//! Scoring is a pure function over an answer set; the service owns the
//! persisted result records and is the only writer.

pub mod catalog;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{Archetype, Pillar, Question, QuestionCatalog, QuestionOption};
pub use domain::{AnswerSet, AnswerValue, ResultId, ResultRecord, ResultRecordView};
pub use repository::{RepositoryError, ResultRepository, UnlockOutcome};
pub use router::result_router;
pub use scoring::{compute_result, ComputedResult};
pub use service::{ResultService, ResultServiceError};
