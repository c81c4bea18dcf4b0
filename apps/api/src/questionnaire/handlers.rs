use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::questionnaire::questions::{score_answers, Answer};

#[derive(Deserialize)]
pub struct ChatbotScoreRequest {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Serialize)]
pub struct ChatbotScoreResponse {
    pub total_score: f64,
}

/// POST /chatbot_score
pub async fn handle_chatbot_score(
    Json(req): Json<ChatbotScoreRequest>,
) -> Result<Json<ChatbotScoreResponse>, AppError> {
    let total_score = score_answers(&req.answers)?;
    Ok(Json(ChatbotScoreResponse { total_score }))
}
