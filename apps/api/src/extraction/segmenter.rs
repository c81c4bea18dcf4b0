//! Document Segmenter: raw PDF bytes to `ParsedResume`.
//!
//! Pure and infallible: every failure along the way degrades to empty text.

use std::sync::Arc;

use tracing::debug;

use crate::extraction::pdf_text;
use crate::extraction::sections::SectionSplitter;
use crate::extraction::skills::SkillExtractor;
use crate::extraction::vocabulary::{HeaderToken, Section};
use crate::models::resume::ParsedResume;

/// Characters of raw text used as `combined_text` when no section text was found.
const COMBINED_FALLBACK_CHARS: usize = 1000;

pub struct Segmenter {
    splitter: SectionSplitter,
    skills: Arc<SkillExtractor>,
}

impl Segmenter {
    pub fn new(headers: &[HeaderToken], skills: Arc<SkillExtractor>) -> Result<Self, regex::Error> {
        Ok(Self {
            splitter: SectionSplitter::new(headers)?,
            skills,
        })
    }

    /// Decodes the PDF and segments its text. Never fails.
    pub fn extract(&self, pdf_bytes: &[u8]) -> ParsedResume {
        let text = pdf_text::extract_text(pdf_bytes);
        self.parse_text(&text)
    }

    /// Segments already-extracted text.
    pub fn parse_text(&self, full_text: &str) -> ParsedResume {
        let mut sections = self.splitter.split(full_text);
        let mut take = |section: Section| sections.remove(&section).unwrap_or_default();

        let experience = take(Section::Experience);
        let education = take(Section::Education);
        let summary = take(Section::Summary);
        let skills_text = take(Section::Skills);

        let skills = if skills_text.is_empty() {
            self.skills.extract_skills(full_text)
        } else {
            self.skills.extract_skills(&skills_text)
        };

        let combined = [summary.as_str(), experience.as_str(), education.as_str()]
            .join(" ")
            .trim()
            .to_string();
        let combined_text = if combined.is_empty() {
            full_text.chars().take(COMBINED_FALLBACK_CHARS).collect()
        } else {
            combined
        };

        debug!(
            chars = full_text.len(),
            skills = skills.len(),
            "Resume segmented"
        );

        ParsedResume {
            raw_text: full_text.to_string(),
            experience: experience.trim().to_string(),
            education: education.trim().to_string(),
            skills,
            combined_text,
        }
    }
}
