use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::service::{
    self, JobIngested, NewJob, NewResume, ResumeIngested, DEFAULT_APPLICANT_NAME,
};
use crate::matching::upload::is_pdf;
use crate::models::match_record::MatchRecord;
use crate::state::AppState;
use crate::storage::json_store::{JobTable, ResumeTable};

/// POST /upload_resume
/// multipart: `resume` (PDF file), optional `applicant_name` or `name`.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeIngested>), AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut applicant_name = None;
    let mut name = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                file = Some((filename, bytes.to_vec()));
            }
            "applicant_name" => applicant_name = Some(field.text().await?),
            "name" => name = Some(field.text().await?),
            _ => {}
        }
    }

    let (filename, bytes) = file.ok_or_else(|| {
        AppError::Validation("No resume file provided (field name resume).".to_string())
    })?;
    if filename.is_empty() {
        return Err(AppError::Validation("Empty filename".to_string()));
    }
    if !is_pdf(&filename) {
        return Err(AppError::Validation("Only PDF allowed".to_string()));
    }

    let applicant_name = [applicant_name, name]
        .into_iter()
        .flatten()
        .map(|n| n.trim().to_string())
        .find(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_APPLICANT_NAME.to_string());

    let ingested = service::ingest_resume(
        &state,
        NewResume {
            applicant_name,
            filename,
            bytes,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(ingested)))
}

/// POST /upload_job
pub async fn handle_upload_job(
    State(state): State<AppState>,
    submission: JobSubmission,
) -> Result<(StatusCode, Json<JobIngested>), AppError> {
    let ingested = service::ingest_job(
        &state,
        NewJob {
            title: submission.title,
            job_text: submission.job_text,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(ingested)))
}

/// GET /jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<JobTable>, AppError> {
    let _guard = state.store.lock().await;
    Ok(Json(state.store.load_jobs().await?))
}

/// GET /resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<ResumeTable>, AppError> {
    let _guard = state.store.lock().await;
    Ok(Json(state.store.load_resumes().await?))
}

/// GET /job_matches/:job_id
pub async fn handle_job_matches(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    Ok(Json(service::job_matches(&state, &job_id).await?))
}

/// GET /resume_matches/:resume_id
pub async fn handle_resume_matches(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    Ok(Json(service::resume_matches(&state, &resume_id).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Job submission extractor
// ────────────────────────────────────────────────────────────────────────────

/// A job posting taken from JSON, multipart or urlencoded form bodies.
///
/// * JSON: `{"job_text": "...", "title": "..."}`
/// * multipart: a `job` text file or a `job_text` field; `title` or `job_title`
/// * form: `job_text`; `title` or `job_title`
pub struct JobSubmission {
    pub title: String,
    pub job_text: String,
}

#[derive(Deserialize, Default)]
struct JobFields {
    job_text: Option<String>,
    title: Option<String>,
    job_title: Option<String>,
}

const NO_JOB_TEXT: &str =
    "No job text provided: send job_text in form or JSON, or upload job file under \"job\"";

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for JobSubmission {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let fields = if content_type.starts_with("application/json") {
            let Json(fields) = Json::<JobFields>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            fields
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            read_multipart_job(multipart).await?
        } else {
            let Form(fields) = Form::<JobFields>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            fields
        };

        let job_text = fields
            .job_text
            .ok_or_else(|| AppError::Validation(NO_JOB_TEXT.to_string()))?;
        let title = [fields.title, fields.job_title]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .unwrap_or_default();

        Ok(Self { title, job_text })
    }
}

/// An uploaded `job` file wins over a `job_text` field.
async fn read_multipart_job(mut multipart: Multipart) -> Result<JobFields, AppError> {
    let mut fields = JobFields::default();
    let mut file_text = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "job" => {
                let bytes = field.bytes().await?;
                file_text = Some(String::from_utf8_lossy(&bytes).into_owned());
            }
            "job_text" => fields.job_text = Some(field.text().await?),
            "title" => fields.title = Some(field.text().await?),
            "job_title" => fields.job_title = Some(field.text().await?),
            _ => {}
        }
    }

    if file_text.is_some() {
        fields.job_text = file_text;
    }
    Ok(fields)
}
