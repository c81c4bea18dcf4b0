use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured view of an uploaded resume, produced by the segmenter and
/// persisted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    /// Sorted, duplicate-free skill labels.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Summary + experience + education, or the head of `raw_text` when those are empty.
    #[serde(default)]
    pub combined_text: String,
}

/// A resume as stored in `resumes.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: String,
    pub name: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub parsed: ParsedResume,
}
