//! Header-based segmentation of resume text into canonical sections.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};

use crate::extraction::vocabulary::{HeaderToken, Section};

/// Accumulated text per canonical section.
pub type SectionMap = BTreeMap<Section, String>;

/// Compiled header vocabulary.
pub struct SectionSplitter {
    pattern: Regex,
    headers: Vec<HeaderToken>,
}

impl SectionSplitter {
    /// Headers match at line start (leading whitespace allowed), case-insensitively,
    /// and swallow trailing whitespace plus any run of `:`, `-` or newlines.
    /// Alternatives are tried in the order given.
    pub fn new(headers: &[HeaderToken]) -> Result<Self, regex::Error> {
        let alternatives = headers
            .iter()
            .map(|h| regex::escape(&h.label))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!(r"^\s*(?P<header>{alternatives})\s*[:\-\n]*"))
            .case_insensitive(true)
            .multi_line(true)
            .build()?;

        Ok(Self {
            pattern,
            headers: headers.to_vec(),
        })
    }

    /// Splits `text` into section blocks. Text before the first header is dropped;
    /// repeated sections are appended with the section's joiner.
    pub fn split(&self, text: &str) -> SectionMap {
        let mut sections = SectionMap::new();
        if self.headers.is_empty() {
            return sections;
        }

        let matches: Vec<_> = self.pattern.captures_iter(text).collect();
        for (i, caps) in matches.iter().enumerate() {
            let (Some(whole), Some(header)) = (caps.get(0), caps.name("header")) else {
                continue;
            };
            let end = matches
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(text.len());
            let block = text[whole.end()..end].trim();

            let section = self.section_for(header.as_str());
            let slot = sections.entry(section).or_default();
            if !slot.is_empty() {
                slot.push_str(section.joiner());
            }
            slot.push_str(block);
        }

        sections
    }

    fn section_for(&self, matched: &str) -> Section {
        self.headers
            .iter()
            .find(|h| h.label.eq_ignore_ascii_case(matched))
            .map(|h| h.section)
            .unwrap_or(Section::Other)
    }
}
