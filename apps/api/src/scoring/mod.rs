// Employability Scorer: skill overlap, pairwise TF-IDF similarity and a title boost.
// Pure and synchronous; shared across handlers behind `Arc<dyn ResumeScorer>`.

pub mod employability;
pub mod tfidf;
