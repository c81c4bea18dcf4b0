// Matching service: resume and job ingestion, pairwise re-scoring, ranked lookup.

pub mod handlers;
pub mod service;
pub mod upload;
