//! Fixed examiner prompt for essay feedback.
//!
//! The essay is the only variable part. It is placed verbatim between two
//! `---` delimiter lines at the end of the prompt.

/// A named dimension the feedback must address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criterion {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

/// The four IELTS Writing band descriptors, in the order they are presented.
pub const CRITERIA: [Criterion; 4] = [
    Criterion {
        name: "Task Achievement",
        abbreviation: "TA",
    },
    Criterion {
        name: "Coherence and Cohesion",
        abbreviation: "CC",
    },
    Criterion {
        name: "Lexical Resource",
        abbreviation: "LR",
    },
    Criterion {
        name: "Grammatical Range and Accuracy",
        abbreviation: "GRA",
    },
];

pub const ESSAY_DELIMITER: &str = "---";

const INTRO: &str = "You are an expert IELTS examiner with 15 years of experience. Your task is to analyze the following IELTS Writing Task 2 essay.";
const GOAL: &str = "Provide a detailed, constructive, and encouraging analysis based on the four official IELTS band descriptors.";
const OVERALL: &str = "First, provide an estimated overall band score.";
const PER_CRITERION_HEADER: &str = "Then, for each of the four criteria, do the following:";
const PER_CRITERION_STEPS: &[&str] = &[
    "Assign a band score for that specific criterion.",
    "Provide a 2-3 sentence explanation for why you gave that score.",
    "Give 2 specific, actionable bullet points for improvement.",
];
const CRITERIA_HEADER: &str = "The four criteria are:";
const FORMAT: &str = "Format your entire response in Markdown. Use headings for each section.";
const ESSAY_HEADER: &str = "Here is the essay to analyze:";

/// Render the examiner instructions that precede the essay.
fn instructions() -> String {
    let steps = PER_CRITERION_STEPS
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    let criteria = CRITERIA
        .iter()
        .map(|c| format!("- {} ({})", c.name, c.abbreviation))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n{INTRO}\n\n{GOAL}\n\n{OVERALL}\n\n{PER_CRITERION_HEADER}\n{steps}\n\n{CRITERIA_HEADER}\n{criteria}\n\n{FORMAT}\n\n{ESSAY_HEADER}\n"
    )
}

/// Build the full prompt for `essay`.
///
/// The essay is appended as-is, never parsed as a template, so braces or
/// placeholder-like text inside it survive unchanged.
pub fn build_essay_prompt(essay: &str) -> String {
    let mut prompt = instructions();
    prompt.reserve(essay.len() + 2 * ESSAY_DELIMITER.len() + 3);
    prompt.push_str(ESSAY_DELIMITER);
    prompt.push('\n');
    prompt.push_str(essay);
    prompt.push('\n');
    prompt.push_str(ESSAY_DELIMITER);
    prompt.push('\n');
    prompt
}
