//! Employability Scorer: `(ParsedResume, job text)` to a score in [0, 100].
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`; handlers never see the concrete type.

use std::collections::BTreeSet;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::debug;

use crate::extraction::skills::SkillExtractor;
use crate::models::resume::ParsedResume;
use crate::scoring::tfidf::{self, DEFAULT_MAX_FEATURES};

// ────────────────────────────────────────────────────────────────────────────
// Weights and output
// ────────────────────────────────────────────────────────────────────────────

/// Linear weights of the three signals. `title_boost` is added as-is when a
/// role keyword is shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skill_overlap: f64,
    pub similarity: f64,
    pub title_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_overlap: 0.6,
            similarity: 0.35,
            title_boost: 0.1,
        }
    }
}

/// Individual signals behind one score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub skill_overlap: f64, // 0.0 – 1.0
    pub similarity: f64,    // 0.0 – 1.0
    pub title_boost: f64,   // 0.0 or weights.title_boost
    pub job_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub score: f64, // 0 – 100, two decimals
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

pub trait ResumeScorer: Send + Sync {
    fn score(&self, resume: &ParsedResume, job_text: &str) -> f64;

    /// Scores many resumes against one job, in input order.
    fn score_batch(&self, resumes: &[&ParsedResume], job_text: &str) -> Vec<f64> {
        resumes.iter().map(|r| self.score(r, job_text)).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// EmployabilityScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct EmployabilityScorer {
    skills: Arc<SkillExtractor>,
    role_keywords: Vec<Regex>,
    weights: ScoringWeights,
    max_features: usize,
}

impl EmployabilityScorer {
    pub fn new(
        skills: Arc<SkillExtractor>,
        role_keywords: &[String],
        weights: ScoringWeights,
    ) -> Result<Self, regex::Error> {
        let role_keywords = role_keywords
            .iter()
            .map(|kw| {
                RegexBuilder::new(&format!(r"\b{}\b", regex::escape(kw)))
                    .case_insensitive(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skills,
            role_keywords,
            weights,
            max_features: DEFAULT_MAX_FEATURES,
        })
    }

    pub fn breakdown(&self, resume: &ParsedResume, job_text: &str) -> ScoreBreakdown {
        let job_skills = self.skills.extract_skills(job_text);
        self.breakdown_with_job_skills(resume, job_text, job_skills)
    }

    /// Same as `breakdown`, with the job's skills already extracted.
    pub fn breakdown_with_job_skills(
        &self,
        resume: &ParsedResume,
        job_text: &str,
        job_skills: Vec<String>,
    ) -> ScoreBreakdown {
        let job_set: BTreeSet<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();
        let resume_set: BTreeSet<String> =
            resume.skills.iter().map(|s| s.to_lowercase()).collect();

        let matched_skills: Vec<String> = job_set.intersection(&resume_set).cloned().collect();
        let skill_overlap = if job_set.is_empty() {
            0.0
        } else {
            matched_skills.len() as f64 / job_set.len() as f64
        };

        let similarity =
            match tfidf::pairwise_cosine(job_text, &resume.combined_text, self.max_features) {
                Ok(sim) => sim,
                Err(e) => {
                    debug!("Similarity unavailable ({e}); using 0");
                    0.0
                }
            };

        let title_boost = if self.shares_role_keyword(job_text, &resume.raw_text) {
            self.weights.title_boost
        } else {
            0.0
        };

        let raw = self.weights.skill_overlap * skill_overlap
            + self.weights.similarity * similarity
            + title_boost;
        let score = round_percent(raw);

        debug!(skill_overlap, similarity, title_boost, score, "Resume scored");

        ScoreBreakdown {
            skill_overlap,
            similarity,
            title_boost,
            job_skills,
            matched_skills,
            score,
        }
    }

    /// Any role keyword in both texts; the boost never stacks.
    fn shares_role_keyword(&self, job_text: &str, resume_text: &str) -> bool {
        self.role_keywords
            .iter()
            .any(|kw| kw.is_match(job_text) && kw.is_match(resume_text))
    }
}

impl ResumeScorer for EmployabilityScorer {
    fn score(&self, resume: &ParsedResume, job_text: &str) -> f64 {
        self.breakdown(resume, job_text).score
    }

    fn score_batch(&self, resumes: &[&ParsedResume], job_text: &str) -> Vec<f64> {
        let job_skills = self.skills.extract_skills(job_text);
        resumes
            .iter()
            .map(|r| {
                self.breakdown_with_job_skills(r, job_text, job_skills.clone())
                    .score
            })
            .collect()
    }
}

/// Clamps to [0, 1] and scales to a percentage with two decimals.
fn round_percent(raw: f64) -> f64 {
    round_two_decimals(raw.clamp(0.0, 1.0) * 100.0)
}

/// Rounds the exact binary value with ties to even, so `0.125` gives `0.12`.
fn round_two_decimals(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
