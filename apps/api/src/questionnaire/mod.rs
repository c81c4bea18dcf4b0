// Questionnaire: fixed multiple-choice bank and normalized answer scoring.

pub mod handlers;
pub mod questions;
