use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting as stored in `jobs.json`. The text is opaque to the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub job_text: String,
    pub uploaded_at: DateTime<Utc>,
}
