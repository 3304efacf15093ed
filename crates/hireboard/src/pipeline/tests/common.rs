use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::pipeline::domain::{
    ActingUser, Candidate, CandidateId, CategoryScores, Job, JobId, JobStatus, ScheduleDetails,
    SmarsEvaluation, Stage,
};
use crate::pipeline::repository::{JobRepository, RepositoryError};
use crate::pipeline::roster::EvaluatorRoster;
use crate::pipeline::router::pipeline_router;
use crate::pipeline::service::HiringPipelineService;

pub(super) fn applied() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 2).expect("valid date")
}

pub(super) fn acting_user() -> ActingUser {
    ActingUser {
        name: "Maya Tan".to_string(),
        role: "Recruiter".to_string(),
    }
}

pub(super) fn candidate(suffix: &str) -> Candidate {
    Candidate::new(
        CandidateId(format!("cand-{suffix}")),
        format!("Candidate {suffix}"),
        "Backend Engineer".to_string(),
        applied(),
    )
}

pub(super) fn candidate_at(suffix: &str, stage: Stage) -> Candidate {
    let mut candidate = candidate(suffix);
    candidate.stage = stage;
    candidate
}

pub(super) fn job_with_candidates(candidates: Vec<Candidate>) -> Job {
    Job {
        id: JobId("job-test".to_string()),
        title: "Backend Engineer".to_string(),
        department: "Engineering".to_string(),
        status: JobStatus::Active,
        created_at: applied(),
        candidates,
    }
}

pub(super) fn schedule_details() -> ScheduleDetails {
    ScheduleDetails::parse(Some("2026-03-10"), Some("14:30"), "Zoom").expect("valid schedule")
}

pub(super) fn evaluation(name: &str, overall: f32) -> SmarsEvaluation {
    SmarsEvaluation {
        name: name.to_string(),
        role: "Engineer".to_string(),
        scores: CategoryScores {
            hr: overall,
            tech: overall,
            culture: overall,
        },
        overall_score: overall,
        points: Vec::new(),
    }
}

pub(super) fn batch(scores: &[f32]) -> Vec<SmarsEvaluation> {
    scores
        .iter()
        .enumerate()
        .map(|(index, score)| evaluation(&format!("Applicant {index}"), *score))
        .collect()
}

pub(super) fn build_service() -> (
    HiringPipelineService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = HiringPipelineService::new(repository.clone(), EvaluatorRoster::standard());
    (service, repository)
}

pub(super) fn pipeline_router_with_service(
    service: HiringPipelineService<MemoryRepository>,
) -> axum::Router {
    pipeline_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) jobs: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRepository for MemoryRepository {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: Job) -> Result<(), RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        guard.insert(job.id.clone(), job);
        Ok(())
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        let mut jobs: Vec<Job> = guard.values().cloned().collect();
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(jobs)
    }
}

pub(super) struct UnavailableRepository;

impl JobRepository for UnavailableRepository {
    fn insert(&self, _job: Job) -> Result<Job, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _job: Job) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
