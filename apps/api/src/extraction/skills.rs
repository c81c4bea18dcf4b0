//! Skill Extractor: tags free text with labels from a skill vocabulary.
//!
//! Two passes, unioned:
//! 1. whole-word, case-insensitive search for every vocabulary label;
//! 2. mining of `Skills:` style lists, where each list item is either mapped
//!    onto a vocabulary label through the pluggable `SkillMatcher` or kept
//!    verbatim as a novel skill.
//!
//! The result is always sorted and duplicate-free.

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// Introduces an inline skill list: `Skills: Rust, Go` / `Expertise - ...`.
/// Captures the rest of the line plus any following non-blank lines.
static SKILL_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:skills?|technical skills?|competencies?|expertise)[:\-]\s*([^\n]+(?:\n[^\n]+)*)")
        .expect("skill list pattern is valid")
});

const MAX_NOVEL_SKILL_CHARS: usize = 50;

/// Strategy deciding whether a mined list item refers to a vocabulary entry.
/// Swap implementations to make the list-mining pass stricter or fuzzier.
pub trait SkillMatcher: Send + Sync {
    fn matches(&self, candidate: &str, vocabulary_entry: &str) -> bool;
}

/// Case-insensitive substring containment in either direction.
pub struct SubstringMatcher;

impl SkillMatcher for SubstringMatcher {
    fn matches(&self, candidate: &str, vocabulary_entry: &str) -> bool {
        let candidate = candidate.to_lowercase();
        let entry = vocabulary_entry.to_lowercase();
        entry.contains(&candidate) || candidate.contains(&entry)
    }
}

/// Case-insensitive equality only.
#[allow(dead_code)]
pub struct ExactMatcher;

impl SkillMatcher for ExactMatcher {
    fn matches(&self, candidate: &str, vocabulary_entry: &str) -> bool {
        candidate.to_lowercase() == vocabulary_entry.to_lowercase()
    }
}

struct VocabularyEntry {
    label: String,
    whole_word: Regex,
}

/// Compiled skill vocabulary plus the list-item matching strategy.
pub struct SkillExtractor {
    entries: Vec<VocabularyEntry>,
    matcher: Arc<dyn SkillMatcher>,
}

impl SkillExtractor {
    /// Compiles one whole-word pattern per distinct label. Repeated labels keep
    /// their first position, which matters for list mining (first match wins).
    pub fn new(skills: &[String], matcher: Arc<dyn SkillMatcher>) -> Result<Self, regex::Error> {
        let mut seen = BTreeSet::new();
        let mut entries = Vec::with_capacity(skills.len());

        for label in skills {
            let label = label.trim();
            if label.is_empty() || !seen.insert(label.to_string()) {
                continue;
            }
            let pattern = format!(r"\b{}\b", regex::escape(&label.to_lowercase()));
            entries.push(VocabularyEntry {
                label: label.to_string(),
                whole_word: Regex::new(&pattern)?,
            });
        }

        Ok(Self { entries, matcher })
    }

    pub fn with_default_matcher(skills: &[String]) -> Result<Self, regex::Error> {
        Self::new(skills, Arc::new(SubstringMatcher))
    }

    /// Distinct labels after trimming and deduplication.
    pub fn label_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the sorted, deduplicated skills mentioned in `text`.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let mut found = BTreeSet::new();
        let lowered = text.to_lowercase();

        for entry in &self.entries {
            if entry.whole_word.is_match(&lowered) {
                found.insert(entry.label.clone());
            }
        }

        for list in SKILL_LIST.captures_iter(text) {
            let Some(body) = list.get(1) else { continue };
            for item in split_list_items(body.as_str()) {
                if let Some(skill) = self.classify_item(item) {
                    found.insert(skill);
                }
            }
        }

        found.into_iter().collect()
    }

    /// Maps a mined list item to a vocabulary label, or keeps it verbatim when
    /// it still looks like a skill.
    fn classify_item(&self, item: &str) -> Option<String> {
        if item.chars().count() <= 2 || is_stray_conjunction(item) {
            return None;
        }

        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| self.matcher.matches(item, &e.label))
        {
            return Some(entry.label.clone());
        }

        let starts_with_digit = item.chars().next().is_some_and(char::is_numeric);
        if item.chars().count() < MAX_NOVEL_SKILL_CHARS && !starts_with_digit {
            return Some(item.to_string());
        }
        None
    }
}

fn split_list_items(body: &str) -> impl Iterator<Item = &str> {
    body.split(|c| matches!(c, ',' | '|' | ';' | '/' | '•' | '-' | '\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn is_stray_conjunction(item: &str) -> bool {
    matches!(item, "and" | "or")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::vocabulary::Vocabulary;

    fn vocab(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn small_extractor(labels: &[&str]) -> SkillExtractor {
        SkillExtractor::with_default_matcher(&vocab(labels)).unwrap()
    }

    fn default_extractor() -> SkillExtractor {
        SkillExtractor::with_default_matcher(&Vocabulary::default().skills).unwrap()
    }

    #[test]
    fn test_whole_word_match_returns_canonical_label() {
        let extractor = small_extractor(&["Python", "Django"]);
        let skills = extractor.extract_skills("looking for PYTHON and django people");
        assert_eq!(skills, vec!["Django".to_string(), "Python".to_string()]);
    }

    #[test]
    fn test_partial_word_does_not_match() {
        let extractor = small_extractor(&["Java"]);
        assert!(extractor.extract_skills("I write JavaScript daily").is_empty());
    }

    #[test]
    fn test_job_scenario_extracts_python_and_django_only() {
        let skills =
            default_extractor().extract_skills("Looking for a Python Developer with Django experience");
        assert_eq!(skills, vec!["Django".to_string(), "Python".to_string()]);
    }

    #[test]
    fn test_skill_list_maps_items_to_vocabulary() {
        let extractor = small_extractor(&["PostgreSQL", "Kubernetes"]);
        let skills = extractor.extract_skills("Skills: postgres, k8s orchestration");
        // "postgres" is a substring of "postgresql"; "k8s orchestration" is novel.
        assert_eq!(
            skills,
            vec!["PostgreSQL".to_string(), "k8s orchestration".to_string()]
        );
    }

    #[test]
    fn test_skill_list_keeps_novel_items_and_drops_noise() {
        let extractor = small_extractor(&["Rust"]);
        let skills = extractor.extract_skills("Expertise: Tokio | 5 years | and | ab\nAxum");
        assert_eq!(skills, vec!["Axum".to_string(), "Tokio".to_string()]);
    }

    #[test]
    fn test_skill_list_rejects_long_items() {
        let extractor = small_extractor(&["Rust"]);
        let long = "x".repeat(60);
        let skills = extractor.extract_skills(&format!("Skills: {long}"));
        assert!(skills.is_empty());
    }

    #[test]
    fn test_skill_list_stops_at_blank_line() {
        let extractor = small_extractor(&["Rust"]);
        let skills = extractor.extract_skills("Skills: Tokio\nAxum\n\nHobbies chess");
        assert_eq!(skills, vec!["Axum".to_string(), "Tokio".to_string()]);
    }

    #[test]
    fn test_output_is_sorted_and_deduplicated() {
        let extractor = small_extractor(&["Rust", "Go", "Rust"]);
        let skills = extractor.extract_skills("Rust, Go, rust again. Skills: Rust, go, Rust");
        assert_eq!(skills, vec!["Go".to_string(), "Rust".to_string()]);

        let mut sorted = skills.clone();
        sorted.sort();
        assert_eq!(skills, sorted);
    }

    #[test]
    fn test_duplicate_vocabulary_labels_collapse() {
        let extractor = small_extractor(&["SQL", "SQL", " ", "Redis"]);
        assert_eq!(extractor.label_count(), 2);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = default_extractor();
        let text = "Technical Skills: Python, Docker, AWS\nLeadership and Mentoring";
        assert_eq!(extractor.extract_skills(text), extractor.extract_skills(text));
    }

    #[test]
    fn test_empty_text_yields_no_skills() {
        assert!(default_extractor().extract_skills("").is_empty());
    }

    #[test]
    fn test_special_character_labels_match() {
        let extractor = small_extractor(&["Node.js", "CI/CD"]);
        let skills = extractor.extract_skills("Built node.js services with ci/cd pipelines");
        assert_eq!(skills, vec!["CI/CD".to_string(), "Node.js".to_string()]);
    }

    #[test]
    fn test_exact_matcher_is_stricter_than_substring() {
        let labels = vocab(&["PostgreSQL"]);
        let exact = SkillExtractor::new(&labels, Arc::new(ExactMatcher)).unwrap();
        let skills = exact.extract_skills("Skills: postgres");
        assert_eq!(skills, vec!["postgres".to_string()]);
    }

    #[test]
    fn test_substring_matcher_both_directions() {
        let m = SubstringMatcher;
        assert!(m.matches("react", "React Native"));
        assert!(m.matches("Advanced Terraform", "terraform"));
        assert!(!m.matches("Haskell", "Scala"));
    }
}
