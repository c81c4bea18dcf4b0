use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::extraction::segmenter::Segmenter;
use crate::extraction::skills::SkillExtractor;
use crate::extraction::vocabulary::Vocabulary;
use crate::scoring::employability::{EmployabilityScorer, ResumeScorer, ScoringWeights};
use crate::storage::json_store::JsonStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<JsonStore>,
    pub segmenter: Arc<Segmenter>,
    /// Pluggable scorer. Default: EmployabilityScorer with default weights.
    pub scorer: Arc<dyn ResumeScorer>,
}

impl AppState {
    /// Compiles the vocabularies and opens the store. The skill extractor is
    /// shared between the segmenter and the scorer.
    pub async fn new(config: Config) -> Result<Self> {
        let mut vocabulary = Vocabulary::default();
        if let Some(path) = &config.skill_vocabulary_path {
            vocabulary = vocabulary.with_skills_file(path)?;
        }

        let skills = Arc::new(
            SkillExtractor::with_default_matcher(&vocabulary.skills)
                .context("Failed to compile skill vocabulary")?,
        );
        info!("Skill vocabulary loaded ({} entries)", skills.label_count());

        let segmenter = Segmenter::new(&vocabulary.headers, Arc::clone(&skills))
            .context("Failed to compile section headers")?;
        let scorer = EmployabilityScorer::new(
            skills,
            &vocabulary.role_keywords,
            ScoringWeights::default(),
        )
        .context("Failed to compile role keywords")?;

        let store = JsonStore::open(&config.data_dir, &config.upload_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create data directories {} and {}",
                    config.data_dir.display(),
                    config.upload_dir.display()
                )
            })?;

        Ok(Self {
            config,
            store: Arc::new(store),
            segmenter: Arc::new(segmenter),
            scorer: Arc::new(scorer),
        })
    }
}
