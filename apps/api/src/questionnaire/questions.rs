//! Question bank and answer scoring.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One multiple-choice question. `values[i]` is the points for `options[i]`.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub text: &'static str,
    pub options: &'static [&'static str],
    pub values: &'static [u32],
}

impl Question {
    pub fn max_value(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Answer {
    pub question: String,
    #[serde(default)]
    pub option_index: usize,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        text: "What is your highest level of education?",
        options: &["High School", "Associate", "Bachelor", "Master", "PhD"],
        values: &[10, 15, 25, 35, 45],
    },
    Question {
        text: "How many years of professional experience do you have in your field?",
        options: &["0-1 years", "2-3 years", "4-5 years", "6+ years"],
        values: &[10, 20, 30, 40],
    },
    Question {
        text: "How would you rate your relevant skills for your field?",
        options: &["Beginner", "Intermediate", "Advanced", "Expert"],
        values: &[10, 20, 30, 40],
    },
    Question {
        text: "Do you have any professional certifications or licenses?",
        options: &["No", "1-2 certifications", "3-4 certifications", "5+ certifications"],
        values: &[0, 15, 25, 35],
    },
    Question {
        text: "How comfortable are you with working in a team environment?",
        options: &["Not comfortable", "Somewhat comfortable", "Comfortable", "Very comfortable"],
        values: &[5, 15, 25, 35],
    },
    Question {
        text: "How would you rate your communication skills?",
        options: &["Poor", "Fair", "Good", "Excellent"],
        values: &[5, 15, 25, 35],
    },
    Question {
        text: "Are you willing to relocate for a job opportunity?",
        options: &["No", "Maybe", "Yes"],
        values: &[0, 10, 20],
    },
    Question {
        text: "How many relevant tools or software are you proficient in for your field?",
        options: &["None", "1-2", "3-4", "5+"],
        values: &[0, 10, 20, 30],
    },
    Question {
        text: "How would you rate your ability to adapt to new processes and systems?",
        options: &["Poor", "Fair", "Good", "Excellent"],
        values: &[5, 15, 25, 35],
    },
    Question {
        text: "How would you rate your problem-solving abilities?",
        options: &["Poor", "Fair", "Good", "Excellent"],
        values: &[5, 15, 25, 35],
    },
    Question {
        text: "Have you worked on projects or tasks with tight deadlines?",
        options: &["Never", "Rarely", "Sometimes", "Frequently"],
        values: &[0, 10, 20, 30],
    },
    Question {
        text: "How would you rate your ability to learn new skills quickly?",
        options: &["Slow", "Average", "Fast", "Very Fast"],
        values: &[5, 15, 25, 35],
    },
];

/// Sum of every question's best answer.
pub fn max_total() -> u32 {
    QUESTIONS.iter().map(Question::max_value).sum()
}

/// Normalizes the chosen options' points to 0–100, two decimals.
/// Answers to questions not in the bank contribute nothing.
pub fn score_answers(answers: &[Answer]) -> Result<f64, AppError> {
    let mut total = 0u32;
    for answer in answers {
        let Some(question) = QUESTIONS.iter().find(|q| q.text == answer.question) else {
            continue;
        };
        let value = question.values.get(answer.option_index).ok_or_else(|| {
            AppError::Validation(format!(
                "option_index {} out of range for question '{}' ({} options)",
                answer.option_index,
                question.text,
                question.options.len()
            ))
        })?;
        total += value;
    }

    let max = max_total();
    if max == 0 {
        return Ok(0.0);
    }
    let normalized = f64::from(total) / f64::from(max) * 100.0;
    Ok((normalized * 100.0).round() / 100.0)
}
