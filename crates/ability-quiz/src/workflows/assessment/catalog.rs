use serde::{Deserialize, Serialize};

/// Weighted category grouping several questions. Four fixed pillars; the
/// weights sum to 1.0 and are applied during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Cognitive,
    Reinforcement,
    Asymmetry,
    Activation,
}

impl Pillar {
    pub const ALL: [Pillar; 4] = [
        Pillar::Cognitive,
        Pillar::Reinforcement,
        Pillar::Asymmetry,
        Pillar::Activation,
    ];

    pub const fn weight(self) -> f64 {
        match self {
            Pillar::Cognitive => 0.35,
            Pillar::Reinforcement => 0.25,
            Pillar::Asymmetry => 0.25,
            Pillar::Activation => 0.15,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Pillar::Cognitive => "Cognitive & Temperamental Predispositions",
            Pillar::Reinforcement => "Early Reinforcement & Conditioning",
            Pillar::Asymmetry => "Effort Asymmetry (Leverage Detection)",
            Pillar::Activation => "Activation Conditions (Context & Environment)",
        }
    }
}

/// Classification outcome assigned from weighted answer tallies.
///
/// Declaration order is load-bearing: it is the tie-break when weighted
/// scores are exactly equal, so reordering variants changes results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Executor,
    Strategist,
    Optimizer,
    Connector,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Executor,
        Archetype::Strategist,
        Archetype::Optimizer,
        Archetype::Connector,
    ];

    /// Map a raw answer tag onto an archetype. Unknown tags are not an
    /// error; the scoring engine simply skips them.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "executor" => Some(Archetype::Executor),
            "strategist" => Some(Archetype::Strategist),
            "optimizer" => Some(Archetype::Optimizer),
            "connector" => Some(Archetype::Connector),
            _ => None,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Archetype::Executor => "executor",
            Archetype::Strategist => "strategist",
            Archetype::Optimizer => "optimizer",
            Archetype::Connector => "connector",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Archetype::Executor => "Executor",
            Archetype::Strategist => "Strategist",
            Archetype::Optimizer => "Optimizer",
            Archetype::Connector => "Connector",
        }
    }
}

/// One selectable answer for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub id: &'static str,
    pub label: &'static str,
    pub value: Archetype,
}

/// A single-choice question belonging to exactly one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub pillar: Pillar,
    pub prompt: &'static str,
    pub options: Vec<QuestionOption>,
    pub required: bool,
}

/// Static ordered question list, defined once at construction and read-only
/// afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

fn question(
    id: &'static str,
    pillar: Pillar,
    prompt: &'static str,
    options: [(&'static str, &'static str, Archetype); 4],
) -> Question {
    Question {
        id,
        pillar,
        prompt,
        options: options
            .into_iter()
            .map(|(id, label, value)| QuestionOption { id, label, value })
            .collect(),
        required: true,
    }
}

impl QuestionCatalog {
    /// The reference sixteen-question instrument: four questions per pillar,
    /// each offering one option per archetype.
    pub fn standard() -> Self {
        use Archetype::{Connector, Executor, Optimizer, Strategist};

        let questions = vec![
            question(
                "q1",
                Pillar::Cognitive,
                "When something breaks unexpectedly, what do you do first?",
                [
                    ("q1-a", "Act and fix immediately", Executor),
                    ("q1-b", "Step back and analyze causes", Strategist),
                    ("q1-c", "Look for how the system could be improved", Optimizer),
                    ("q1-d", "Pull others in and coordinate", Connector),
                ],
            ),
            question(
                "q2",
                Pillar::Cognitive,
                "When learning something new, what feels most natural?",
                [
                    ("q2-a", "Experiment immediately", Executor),
                    ("q2-b", "Understand the theory", Strategist),
                    ("q2-c", "Improve an existing example", Optimizer),
                    ("q2-d", "Explain it to someone else", Connector),
                ],
            ),
            question(
                "q3",
                Pillar::Cognitive,
                "In unfamiliar situations, you tend to:",
                [
                    ("q3-a", "Act and adjust", Executor),
                    ("q3-b", "Observe and map patterns", Strategist),
                    ("q3-c", "Look for efficiency gains", Optimizer),
                    ("q3-d", "Read social dynamics", Connector),
                ],
            ),
            question(
                "q4",
                Pillar::Cognitive,
                "You trust decisions most when they're based on:",
                [
                    ("q4-a", "Real-world action", Executor),
                    ("q4-b", "Logical structure", Strategist),
                    ("q4-c", "Optimization and refinement", Optimizer),
                    ("q4-d", "Group alignment", Connector),
                ],
            ),
            question(
                "q5",
                Pillar::Reinforcement,
                "Growing up, you were most praised for:",
                [
                    ("q5-a", "Getting things done", Executor),
                    ("q5-b", "Being smart or logical", Strategist),
                    ("q5-c", "Being creative or original", Optimizer),
                    ("q5-d", "Being helpful or responsible", Connector),
                ],
            ),
            question(
                "q6",
                Pillar::Reinforcement,
                "You learned early that it was better to:",
                [
                    ("q6-a", "Take initiative", Executor),
                    ("q6-b", "Be correct", Strategist),
                    ("q6-c", "Be expressive", Optimizer),
                    ("q6-d", "Be agreeable", Connector),
                ],
            ),
            question(
                "q7",
                Pillar::Reinforcement,
                "Which tendency did you learn to hide or soften?",
                [
                    ("q7-a", "Taking charge", Executor),
                    ("q7-b", "Overthinking", Strategist),
                    ("q7-c", "Being unconventional", Optimizer),
                    ("q7-d", "Needing independence", Connector),
                ],
            ),
            question(
                "q8",
                Pillar::Reinforcement,
                "You disappointed authority figures most when you:",
                [
                    ("q8-a", "Acted too independently", Executor),
                    ("q8-b", "Questioned logic", Strategist),
                    ("q8-c", "Didn't follow conventions", Optimizer),
                    ("q8-d", "Disrupted harmony", Connector),
                ],
            ),
            question(
                "q9",
                Pillar::Asymmetry,
                "Compared to others, what do you learn faster with the same effort?",
                [
                    ("q9-a", "Practical execution", Executor),
                    ("q9-b", "Abstract concepts", Strategist),
                    ("q9-c", "System improvement", Optimizer),
                    ("q9-d", "Navigating people", Connector),
                ],
            ),
            question(
                "q10",
                Pillar::Asymmetry,
                "What do people assume required training, but didn't for you?",
                [
                    ("q10-a", "Acting under pressure", Executor),
                    ("q10-b", "Seeing structure", Strategist),
                    ("q10-c", "Refining details", Optimizer),
                    ("q10-d", "Reading situations", Connector),
                ],
            ),
            question(
                "q11",
                Pillar::Asymmetry,
                "What do you get impatient explaining because it feels obvious?",
                [
                    ("q11-a", "How to start", Executor),
                    ("q11-b", "Why it works", Strategist),
                    ("q11-c", "How to improve it", Optimizer),
                    ("q11-d", "How people react", Connector),
                ],
            ),
            question(
                "q12",
                Pillar::Asymmetry,
                "When you push slightly beyond comfort, results tend to:",
                [
                    ("q12-a", "Appear quickly", Executor),
                    ("q12-b", "Become clearer", Strategist),
                    ("q12-c", "Become more refined", Optimizer),
                    ("q12-d", "Gain broader impact", Connector),
                ],
            ),
            question(
                "q13",
                Pillar::Activation,
                "You perform best when:",
                [
                    ("q13-a", "Acting independently", Executor),
                    ("q13-b", "Solving complex problems", Strategist),
                    ("q13-c", "Improving existing work", Optimizer),
                    ("q13-d", "Coordinating others", Connector),
                ],
            ),
            question(
                "q14",
                Pillar::Activation,
                "What kind of pressure sharpens you?",
                [
                    ("q14-a", "Time pressure", Executor),
                    ("q14-b", "Cognitive challenge", Strategist),
                    ("q14-c", "Precision standards", Optimizer),
                    ("q14-d", "Social responsibility", Connector),
                ],
            ),
            question(
                "q15",
                Pillar::Activation,
                "What kind of difficulty pulls you in?",
                [
                    ("q15-a", "Fast execution", Executor),
                    ("q15-b", "Deep complexity", Strategist),
                    ("q15-c", "Fine-tuning", Optimizer),
                    ("q15-d", "Interpersonal dynamics", Connector),
                ],
            ),
            question(
                "q16",
                Pillar::Activation,
                "You feel most energized after:",
                [
                    ("q16-a", "Decisive action", Executor),
                    ("q16-b", "Solving a hard problem", Strategist),
                    ("q16-c", "Making something better", Optimizer),
                    ("q16-d", "Aligning people", Connector),
                ],
            ),
        ];

        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn required(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|question| question.required)
    }
}
