mod content;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{Archetype, Pillar, QuestionCatalog};
use super::domain::AnswerSet;

/// Share of the primary's weighted score the runner-up must reach before it
/// is reported as a secondary archetype.
const SECONDARY_THRESHOLD: f64 = 0.85;

/// Evidence is capped at the first few matches in catalog order; the rest of
/// the matched questions still count toward the score.
const EVIDENCE_LIMIT: usize = 5;

/// Frozen classification snapshot embedded in a result record. Never
/// recomputed after creation, even if the catalog or weights change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedResult {
    pub primary: Archetype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Archetype>,
    pub raw_scores: BTreeMap<Archetype, u32>,
    pub weighted_scores: BTreeMap<Archetype, f64>,
    pub pillar_scores: BTreeMap<Pillar, BTreeMap<Archetype, u32>>,
    pub evidence: Vec<String>,
    pub relief_framing: Vec<String>,
    pub activation_conditions: Vec<String>,
    pub anti_patterns: Vec<String>,
    pub seven_day_plan: Vec<String>,
}

/// Classify a completed answer set against the catalog.
///
/// Pure and total: any answer that is missing, not a string tag, or not in
/// the archetype vocabulary contributes nothing. An empty answer set still
/// resolves deterministically via the declaration-order tie-break.
pub fn compute_result(catalog: &QuestionCatalog, answers: &AnswerSet) -> ComputedResult {
    let mut pillar_scores: BTreeMap<Pillar, BTreeMap<Archetype, u32>> = Pillar::ALL
        .into_iter()
        .map(|pillar| (pillar, zero_counts()))
        .collect();

    for question in catalog.questions() {
        let Some(archetype) = answered_archetype(answers, question.id) else {
            continue;
        };
        if let Some(count) = pillar_scores
            .get_mut(&question.pillar)
            .and_then(|bucket| bucket.get_mut(&archetype))
        {
            *count += 1;
        }
    }

    let mut raw_scores = zero_counts();
    let mut weighted_scores: BTreeMap<Archetype, f64> = Archetype::ALL
        .into_iter()
        .map(|archetype| (archetype, 0.0))
        .collect();

    for (pillar, bucket) in &pillar_scores {
        for (archetype, count) in bucket {
            *raw_scores.entry(*archetype).or_default() += count;
            *weighted_scores.entry(*archetype).or_default() +=
                f64::from(*count) * pillar.weight();
        }
    }

    // Stable sort seeded in declaration order: the first-declared archetype
    // wins exact ties, keeping results reproducible.
    let mut ranking: Vec<(Archetype, f64)> = Archetype::ALL
        .into_iter()
        .map(|archetype| (archetype, weighted_scores[&archetype]))
        .collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (primary, primary_score) = ranking[0];
    let (runner_up, runner_up_score) = ranking[1];

    // The `> 0` guard runs first so a zero-score board never reports a
    // spurious secondary.
    let secondary = (runner_up_score > 0.0
        && runner_up_score >= primary_score * SECONDARY_THRESHOLD)
        .then_some(runner_up);

    let mut evidence = Vec::new();
    for question in catalog.questions() {
        if evidence.len() == EVIDENCE_LIMIT {
            break;
        }
        if answered_archetype(answers, question.id) != Some(primary) {
            continue;
        }
        if let Some(line) = content::evidence_line(primary, question.id) {
            evidence.push(line.to_string());
        }
    }

    ComputedResult {
        primary,
        secondary,
        raw_scores,
        weighted_scores,
        pillar_scores,
        evidence,
        relief_framing: owned(content::relief_framing(primary)),
        activation_conditions: owned(content::activation_conditions(primary)),
        anti_patterns: owned(content::anti_patterns(primary)),
        seven_day_plan: owned(content::seven_day_plan(primary)),
    }
}

fn answered_archetype(answers: &AnswerSet, question_id: &str) -> Option<Archetype> {
    answers
        .get(question_id)
        .and_then(|answer| answer.recognized_tag())
        .and_then(Archetype::from_tag)
}

fn zero_counts() -> BTreeMap<Archetype, u32> {
    Archetype::ALL
        .into_iter()
        .map(|archetype| (archetype, 0))
        .collect()
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}
