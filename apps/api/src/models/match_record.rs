use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score of one resume against one job. Replaced wholesale on recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub resume_id: String,
    pub job_id: String,
    pub applicant_name: String,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

/// `job_id → resume_id → match`. Keying by the pair makes re-scoring an overwrite.
pub type MatchTable = BTreeMap<String, BTreeMap<String, MatchRecord>>;

/// Sorts matches best-first. Ties keep their incoming order.
pub fn rank_by_score(mut matches: Vec<MatchRecord>) -> Vec<MatchRecord> {
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}
