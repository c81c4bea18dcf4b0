//! Ingestion and re-scoring.
//!
//! A new resume is scored against every stored job; a new job against every
//! stored resume. Each request writes its whole batch of matches in a single
//! `save_matches`, under the store lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::upload::{sanitize_filename, sanitize_id_part};
use crate::models::job::JobRecord;
use crate::models::match_record::{rank_by_score, MatchRecord};
use crate::models::resume::{ParsedResume, ResumeRecord};
use crate::state::AppState;

pub const DEFAULT_APPLICANT_NAME: &str = "Applicant";

pub struct NewResume {
    pub applicant_name: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct NewJob {
    pub title: String,
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub job_id: String,
    pub resume_id: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct ResumeIngested {
    pub resume_id: String,
    pub parsed: ParsedResume,
    pub matches_created: Vec<MatchSummary>,
}

#[derive(Debug, Serialize)]
pub struct JobIngested {
    pub job_id: String,
    pub title: String,
    pub matches_count: usize,
}

/// Saves the upload, segments it off the async runtime, persists the resume
/// and scores it against all jobs.
pub async fn ingest_resume(state: &AppState, upload: NewResume) -> Result<ResumeIngested, AppError> {
    let filename = sanitize_filename(&upload.filename);
    state.store.save_upload(&filename, &upload.bytes).await?;

    let segmenter = Arc::clone(&state.segmenter);
    let bytes = upload.bytes;
    let parsed = run_blocking("resume segmentation", move || segmenter.extract(&bytes)).await?;

    let _guard = state.store.lock().await;

    let now = Utc::now();
    let mut resumes = state.store.load_resumes().await?;
    let resume_id = unique_id(
        format!("{}_{}", sanitize_id_part(&upload.applicant_name), now.timestamp()),
        &resumes,
    );
    let record = ResumeRecord {
        id: resume_id.clone(),
        name: upload.applicant_name.clone(),
        filename,
        uploaded_at: now,
        parsed: parsed.clone(),
    };
    resumes.insert(resume_id.clone(), record);
    state.store.save_resumes(&resumes).await?;

    let jobs = state.store.load_jobs().await?;
    let mut matches = state.store.load_matches().await?;

    // CPU-bound: one skill pass and one TF-IDF per job.
    let scorer = Arc::clone(&state.scorer);
    let resume = parsed.clone();
    let scores: Vec<(String, f64)> = run_blocking("resume scoring", move || {
        jobs.into_values()
            .map(|job| {
                let score = scorer.score(&resume, &job.job_text);
                (job.id, score)
            })
            .collect()
    })
    .await?;

    let mut matches_created = Vec::with_capacity(scores.len());
    for (job_id, score) in scores {
        matches_created.push(MatchSummary {
            job_id: job_id.clone(),
            resume_id: resume_id.clone(),
            score,
        });
        let record = MatchRecord {
            resume_id: resume_id.clone(),
            job_id: job_id.clone(),
            applicant_name: upload.applicant_name.clone(),
            score,
            timestamp: Utc::now(),
        };
        matches
            .entry(job_id)
            .or_default()
            .insert(resume_id.clone(), record);
    }
    state.store.save_matches(&matches).await?;

    info!(
        resume_id = %resume_id,
        skills = parsed.skills.len(),
        matches = matches_created.len(),
        "Resume ingested"
    );

    Ok(ResumeIngested {
        resume_id,
        parsed,
        matches_created,
    })
}

/// Persists the job and scores every stored resume against it.
pub async fn ingest_job(state: &AppState, job: NewJob) -> Result<JobIngested, AppError> {
    let _guard = state.store.lock().await;

    let now = Utc::now();
    let mut jobs = state.store.load_jobs().await?;
    let job_id = unique_id(format!("job_{}", now.timestamp()), &jobs);
    let record = JobRecord {
        id: job_id.clone(),
        title: job.title.clone(),
        job_text: job.job_text.clone(),
        uploaded_at: now,
    };
    jobs.insert(job_id.clone(), record);
    state.store.save_jobs(&jobs).await?;

    let resumes = state.store.load_resumes().await?;
    let mut matches = state.store.load_matches().await?;

    // CPU-bound: the job's skills are extracted once for the whole batch.
    let scorer = Arc::clone(&state.scorer);
    let job_text = job.job_text;
    let scored: Vec<(String, String, f64)> = run_blocking("job scoring", move || {
        let scores = {
            let parsed: Vec<&ParsedResume> = resumes.values().map(|r| &r.parsed).collect();
            scorer.score_batch(&parsed, &job_text)
        };
        resumes
            .into_values()
            .zip(scores)
            .map(|(resume, score)| (resume.id, resume.name, score))
            .collect()
    })
    .await?;

    let job_matches = matches.entry(job_id.clone()).or_default();
    for (resume_id, applicant_name, score) in scored {
        let record = MatchRecord {
            resume_id: resume_id.clone(),
            job_id: job_id.clone(),
            applicant_name,
            score,
            timestamp: Utc::now(),
        };
        job_matches.insert(resume_id, record);
    }
    let matches_count = job_matches.len();
    state.store.save_matches(&matches).await?;

    info!(job_id = %job_id, matches = matches_count, "Job ingested");

    Ok(JobIngested {
        job_id,
        title: job.title,
        matches_count,
    })
}

/// Applicants for `job_id`, best first.
pub async fn job_matches(state: &AppState, job_id: &str) -> Result<Vec<MatchRecord>, AppError> {
    let _guard = state.store.lock().await;
    let mut matches = state.store.load_matches().await?;

    match matches.remove(job_id) {
        Some(by_resume) => Ok(rank_by_score(by_resume.into_values().collect())),
        None if state.store.load_jobs().await?.contains_key(job_id) => Ok(Vec::new()),
        None => Err(AppError::NotFound(format!("Job {job_id} not found"))),
    }
}

/// Jobs scored for `resume_id`, best first.
pub async fn resume_matches(
    state: &AppState,
    resume_id: &str,
) -> Result<Vec<MatchRecord>, AppError> {
    let _guard = state.store.lock().await;
    let matches = state.store.load_matches().await?;

    let found: Vec<MatchRecord> = matches
        .into_values()
        .filter_map(|mut by_resume| by_resume.remove(resume_id))
        .collect();

    if found.is_empty() && !state.store.load_resumes().await?.contains_key(resume_id) {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }
    Ok(rank_by_score(found))
}

/// Runs CPU-bound work off the async executor.
async fn run_blocking<T, F>(what: &str, f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {what}: {e}")))
}

/// `base`, or `base_2`, `base_3`, ... when an upload in the same second took it.
fn unique_id<V>(base: String, taken: &BTreeMap<String, V>) -> String {
    if !taken.contains_key(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    async fn state(root: &std::path::Path) -> AppState {
        AppState::new(Config::for_dir(root)).await.unwrap()
    }

    fn job(text: &str) -> NewJob {
        NewJob {
            title: "Backend".to_string(),
            job_text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_job_without_resumes_has_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path()).await;

        let ingested = ingest_job(&state, job("Rust developer")).await.unwrap();
        assert!(ingested.job_id.starts_with("job_"));
        assert_eq!(ingested.matches_count, 0);
        assert!(job_matches(&state, &ingested.job_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_resume_is_still_ingested_and_scored() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path()).await;
        let job = ingest_job(&state, job("Python developer")).await.unwrap();

        let ingested = ingest_resume(
            &state,
            NewResume {
                applicant_name: "Jane".to_string(),
                filename: "../jane cv.pdf".to_string(),
                bytes: b"not a pdf".to_vec(),
            },
        )
        .await
        .unwrap();

        assert!(ingested.resume_id.starts_with("Jane_"));
        assert_eq!(ingested.parsed, ParsedResume::default());
        assert_eq!(ingested.matches_created.len(), 1);
        assert_eq!(ingested.matches_created[0].job_id, job.job_id);
        assert_eq!(ingested.matches_created[0].score, 0.0);
        assert!(dir.path().join("uploads").join("jane_cv.pdf").exists());

        let ranked = resume_matches(&state, &ingested.resume_id).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].applicant_name, "Jane");
    }

    #[tokio::test]
    async fn test_job_matches_ranked_best_first() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path()).await;

        let mut resumes = state.store.load_resumes().await.unwrap();
        for (id, skills, text) in [
            ("weak_1", vec![], "gardening and cooking"),
            ("strong_1", vec!["Python".to_string()], "Python developer building APIs"),
        ] {
            resumes.insert(
                id.to_string(),
                ResumeRecord {
                    id: id.to_string(),
                    name: id.to_string(),
                    filename: "cv.pdf".to_string(),
                    uploaded_at: Utc::now(),
                    parsed: ParsedResume {
                        raw_text: text.to_string(),
                        combined_text: text.to_string(),
                        skills,
                        ..Default::default()
                    },
                },
            );
        }
        state.store.save_resumes(&resumes).await.unwrap();

        let ingested = ingest_job(&state, job("Python developer")).await.unwrap();
        assert_eq!(ingested.matches_count, 2);

        let ranked = job_matches(&state, &ingested.job_id).await.unwrap();
        assert_eq!(ranked[0].resume_id, "strong_1");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[tokio::test]
    async fn test_jobs_in_same_second_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path()).await;

        let first = ingest_job(&state, job("one")).await.unwrap();
        let second = ingest_job(&state, job("two")).await.unwrap();
        assert_ne!(first.job_id, second.job_id);
        assert_eq!(state.store.load_jobs().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_resume_id_is_path_safe_but_name_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path()).await;

        let ingested = ingest_resume(
            &state,
            NewResume {
                applicant_name: "Ana/María O'Neil".to_string(),
                filename: "cv.pdf".to_string(),
                bytes: Vec::new(),
            },
        )
        .await
        .unwrap();

        assert!(ingested.resume_id.starts_with("AnaMara_ONeil_"), "{}", ingested.resume_id);
        let resumes = state.store.load_resumes().await.unwrap();
        assert_eq!(resumes[&ingested.resume_id].name, "Ana/María O'Neil");
        assert!(resume_matches(&state, &ingested.resume_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_store_fails_ingestion() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path()).await;
        std::fs::create_dir(dir.path().join("data").join("jobs.json")).unwrap();

        let result = ingest_job(&state, job("Rust developer")).await;
        assert!(matches!(result, Err(AppError::Io(_))));
        assert!(dir.path().join("data").join("jobs.json").is_dir());
    }

    #[test]
    fn test_unique_id_appends_counter() {
        let mut taken = BTreeMap::new();
        assert_eq!(unique_id("job_1".to_string(), &taken), "job_1");
        taken.insert("job_1".to_string(), ());
        taken.insert("job_1_2".to_string(), ());
        assert_eq!(unique_id("job_1".to_string(), &taken), "job_1_3");
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path()).await;

        assert!(matches!(
            job_matches(&state, "job_0").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            resume_matches(&state, "nobody_0").await,
            Err(AppError::NotFound(_))
        ));
    }
}
