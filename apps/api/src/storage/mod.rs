// Store: JSON-file persistence for resumes, jobs and matches, plus raw uploads.

pub mod json_store;
