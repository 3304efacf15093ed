use serde::Serialize;

use super::domain::{Candidate, CandidateId, Job, JobId, JobStatus, PercentileBand, Stage};

/// Storage abstraction so the service facade can be exercised in isolation.
/// One write per operation; serializing concurrent writers is the caller's
/// responsibility (last write wins).
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError>;
    fn update(&self, job: Job) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn list(&self) -> Result<Vec<Job>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized candidate snapshot for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateStatusView {
    pub candidate_id: CandidateId,
    pub name: String,
    pub stage: &'static str,
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_band: Option<PercentileBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_at_rejection: Option<&'static str>,
    pub has_upcoming_schedule: bool,
}

impl CandidateStatusView {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            candidate_id: candidate.id.clone(),
            name: candidate.name.clone(),
            stage: candidate.stage.label(),
            score: candidate.score,
            percentile_band: candidate.percentile_band,
            stage_at_rejection: candidate.stage_at_rejection.map(Stage::label),
            has_upcoming_schedule: candidate.upcoming_schedule.is_some(),
        }
    }
}

/// Job header plus candidate snapshots for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatusView {
    pub job_id: JobId,
    pub title: String,
    pub department: String,
    pub status: JobStatus,
    pub candidate_count: usize,
    pub candidates: Vec<CandidateStatusView>,
}

impl JobStatusView {
    pub fn from_job(job: &Job) -> Self {
        Self {
            job_id: job.id.clone(),
            title: job.title.clone(),
            department: job.department.clone(),
            status: job.status,
            candidate_count: job.candidates.len(),
            candidates: job
                .candidates
                .iter()
                .map(CandidateStatusView::from_candidate)
                .collect(),
        }
    }
}
