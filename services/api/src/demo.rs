use crate::infra::InMemoryResultRepository;
use ability_quiz::error::AppError;
use ability_quiz::workflows::assessment::{
    compute_result, AnswerSet, AnswerValue, QuestionCatalog, ResultService,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file mapping question ids to chosen option values,
    /// e.g. {"q1": "executor", "q2": "strategist", ...}
    #[arg(long)]
    pub(crate) answers: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.answers)?;
    let answers: AnswerSet = serde_json::from_str(&raw)?;

    let catalog = QuestionCatalog::standard();
    let result = compute_result(&catalog, &answers);

    println!("Primary archetype: {}", result.primary.display_name());
    match result.secondary {
        Some(secondary) => println!("Secondary archetype: {}", secondary.display_name()),
        None => println!("Secondary archetype: none"),
    }

    println!("\nWeighted scores");
    for (archetype, score) in &result.weighted_scores {
        println!("- {}: {:.2}", archetype.display_name(), score);
    }

    println!("\nFull result");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Ability quiz lifecycle demo");

    let repository = Arc::new(InMemoryResultRepository::default());
    let service = ResultService::new(repository);

    let answers = demo_answers();
    let record = service.create(answers)?;
    println!(
        "- Submitted {} answers -> result {} created (locked)",
        record.answers.len(),
        record.id
    );

    let locked = record.api_view();
    println!("  Locked payload (headline only):");
    println!("{}", serde_json::to_string_pretty(&locked)?);

    service.attach_email(record.id, "demo@example.com")?;
    println!("- Attached delivery email");

    service.unlock(record.id, Some("demo-txn"))?;
    println!("- Payment confirmed -> result unlocked");

    let unlocked = service.get(record.id)?.api_view();
    println!("  Unlocked payload:");
    println!("{}", serde_json::to_string_pretty(&unlocked)?);

    Ok(())
}

/// A mixed answer set producing a primary with a close secondary.
fn demo_answers() -> AnswerSet {
    let picks = [
        ("q1", "executor"),
        ("q2", "executor"),
        ("q3", "strategist"),
        ("q4", "executor"),
        ("q5", "strategist"),
        ("q6", "executor"),
        ("q7", "strategist"),
        ("q8", "executor"),
        ("q9", "executor"),
        ("q10", "strategist"),
        ("q11", "executor"),
        ("q12", "optimizer"),
        ("q13", "executor"),
        ("q14", "strategist"),
        ("q15", "connector"),
        ("q16", "executor"),
    ];
    picks
        .into_iter()
        .map(|(question, tag)| (question.to_string(), AnswerValue::Tag(tag.to_string())))
        .collect()
}
