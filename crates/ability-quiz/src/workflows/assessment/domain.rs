use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::Archetype;
use super::scoring::ComputedResult;

/// Store-assigned identifier for a persisted result. Canonical shape is a
/// positive integer; the format carries no semantics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResultId(pub u64);

impl ResultId {
    /// Parse an identifier from an untrusted string. Zero, signs, and
    /// non-numeric input are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        match trimmed.parse::<u64>() {
            Ok(value) if value > 0 => Some(ResultId(value)),
            _ => None,
        }
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single submitted answer. Only string tags participate in scoring; the
/// other shapes are accepted on the wire and skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Tag(String),
    Scale(f64),
    Tags(Vec<String>),
    Empty,
}

impl AnswerValue {
    /// Whether this answer counts as missing for required-question checks.
    pub fn is_missing(&self) -> bool {
        match self {
            AnswerValue::Tag(tag) => tag.trim().is_empty(),
            AnswerValue::Tags(tags) => tags.is_empty(),
            AnswerValue::Scale(_) => false,
            AnswerValue::Empty => true,
        }
    }

    /// The raw tag if this is a non-empty single choice.
    pub fn recognized_tag(&self) -> Option<&str> {
        match self {
            AnswerValue::Tag(tag) if !tag.trim().is_empty() => Some(tag.trim()),
            _ => None,
        }
    }
}

/// Question-id to answer mapping, supplied once per result and immutable
/// after submission.
pub type AnswerSet = BTreeMap<String, AnswerValue>;

/// The persisted entity holding answers, the frozen classification, and
/// payment/unlock state. Owned exclusively by the result service; records
/// are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: ResultId,
    pub answers: AnswerSet,
    pub computed_result: ComputedResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub paid: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ResultRecord {
    /// Invariant check: `paid` and `unlocked_at` move together.
    pub fn is_unlocked(&self) -> bool {
        debug_assert_eq!(self.paid, self.unlocked_at.is_some());
        self.paid
    }

    /// API projection. While the record is locked only the primary archetype
    /// name is disclosed; the full classification ships once paid.
    pub fn api_view(&self) -> ResultRecordView {
        ResultRecordView {
            id: self.id,
            primary: self.computed_result.primary,
            primary_label: self.computed_result.primary.display_name(),
            paid: self.paid,
            unlocked_at: self.unlocked_at,
            created_at: self.created_at,
            email: self.email.clone(),
            computed_result: self.paid.then(|| self.computed_result.clone()),
        }
    }
}

/// Sanitized representation of a result for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecordView {
    pub id: ResultId,
    pub primary: Archetype,
    pub primary_label: &'static str,
    pub paid: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_result: Option<ComputedResult>,
}
