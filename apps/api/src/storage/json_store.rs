//! File-backed collections.
//!
//! Each collection is one pretty-printed JSON object on disk. A missing or
//! unparseable file reads as an empty collection; any other read failure is an
//! error, so a load-modify-save never replaces data it could not see. Writes go to a sibling temp file
//! that is renamed over the target, so a failed write leaves the old file.
//! Callers hold `lock()` across every load-modify-save sequence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, warn};

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::models::match_record::MatchTable;
use crate::models::resume::ResumeRecord;

const RESUMES_FILE: &str = "resumes.json";
const JOBS_FILE: &str = "jobs.json";
const MATCHES_FILE: &str = "matches.json";

pub type ResumeTable = BTreeMap<String, ResumeRecord>;
pub type JobTable = BTreeMap<String, JobRecord>;

pub struct JsonStore {
    data_dir: PathBuf,
    upload_dir: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    /// Creates both directories if needed.
    pub async fn open(data_dir: &Path, upload_dir: &Path) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(data_dir).await?;
        tokio::fs::create_dir_all(upload_dir).await?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            upload_dir: upload_dir.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    /// Serializes persistence phases across requests.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    pub async fn load_resumes(&self) -> Result<ResumeTable, AppError> {
        self.load(RESUMES_FILE).await
    }

    pub async fn save_resumes(&self, resumes: &ResumeTable) -> Result<(), AppError> {
        self.save(RESUMES_FILE, resumes).await
    }

    pub async fn load_jobs(&self) -> Result<JobTable, AppError> {
        self.load(JOBS_FILE).await
    }

    pub async fn save_jobs(&self, jobs: &JobTable) -> Result<(), AppError> {
        self.save(JOBS_FILE, jobs).await
    }

    pub async fn load_matches(&self) -> Result<MatchTable, AppError> {
        self.load(MATCHES_FILE).await
    }

    pub async fn save_matches(&self, matches: &MatchTable) -> Result<(), AppError> {
        self.save(MATCHES_FILE, matches).await
    }

    /// Writes an uploaded file under the upload directory; returns its path.
    /// `filename` must already be sanitized.
    pub async fn save_upload(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
        let path = self.upload_dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "Upload saved");
        Ok(path)
    }

    async fn load<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, AppError> {
        let path = self.data_dir.join(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => {
                error!("Could not read {}: {e}", path.display());
                return Err(e.into());
            }
        };
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!("Could not parse {}: {e}; treating as empty", path.display());
            T::default()
        }))
    }

    async fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AppError> {
        let path = self.data_dir.join(name);
        let tmp = self.data_dir.join(format!(".{name}.tmp"));
        let json = serde_json::to_vec_pretty(value)?;

        tokio::fs::write(&tmp, &json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::match_record::MatchRecord;

    async fn store(root: &Path) -> JsonStore {
        JsonStore::open(&root.join("data"), &root.join("uploads"))
            .await
            .unwrap()
    }

    fn job(id: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: "Backend".to_string(),
            job_text: "Rust developer".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_open_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        store(dir.path()).await;
        assert!(dir.path().join("data").is_dir());
        assert!(dir.path().join("uploads").is_dir());
    }

    #[tokio::test]
    async fn test_missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path()).await;
        assert!(s.load_resumes().await.unwrap().is_empty());
        assert!(s.load_jobs().await.unwrap().is_empty());
        assert!(s.load_matches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path()).await;
        std::fs::write(dir.path().join("data").join(JOBS_FILE), b"{not json").unwrap();
        assert!(s.load_jobs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_file_is_an_error_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path()).await;
        // A directory where the file should be fails to read with something
        // other than NotFound.
        std::fs::create_dir(dir.path().join("data").join(RESUMES_FILE)).unwrap();

        let err = s.load_resumes().await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_jobs_round_trip_and_no_temp_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path()).await;

        let mut jobs = JobTable::new();
        jobs.insert("job_1".to_string(), job("job_1"));
        s.save_jobs(&jobs).await.unwrap();

        let loaded = s.load_jobs().await.unwrap();
        assert_eq!(loaded["job_1"].job_text, "Rust developer");
        assert!(!dir.path().join("data").join(".jobs.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_match_overwrite_for_same_pair() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path()).await;

        let record = |score| MatchRecord {
            resume_id: "Jane_1".to_string(),
            job_id: "job_1".to_string(),
            applicant_name: "Jane".to_string(),
            score,
            timestamp: Utc::now(),
        };

        let _guard = s.lock().await;
        let mut matches = s.load_matches().await.unwrap();
        matches
            .entry("job_1".to_string())
            .or_default()
            .insert("Jane_1".to_string(), record(10.0));
        s.save_matches(&matches).await.unwrap();

        let mut matches = s.load_matches().await.unwrap();
        matches
            .entry("job_1".to_string())
            .or_default()
            .insert("Jane_1".to_string(), record(75.5));
        s.save_matches(&matches).await.unwrap();

        let matches = s.load_matches().await.unwrap();
        assert_eq!(matches["job_1"].len(), 1);
        assert_eq!(matches["job_1"]["Jane_1"].score, 75.5);
    }

    #[tokio::test]
    async fn test_save_upload_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path()).await;
        let path = s.save_upload("cv.pdf", b"%PDF-1.4").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.4");
    }
}
