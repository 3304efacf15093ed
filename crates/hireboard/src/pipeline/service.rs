use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use super::board::BoardView;
use super::domain::{
    ActingUser, Candidate, CandidateId, Job, JobId, JobStatus, PrivateNote, ScheduleDetails,
    SmarsEvaluation, Stage, ValidationError,
};
use super::engine::{self, InvalidTransitionError};
use super::ledger;
use super::ranker::{self, BatchAdmission};
use super::report::{interview_calendar, DashboardSummary, InterviewSlot};
use super::repository::{JobRepository, RepositoryError};
use super::roster::EvaluatorRoster;
use super::scoring;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

fn next_candidate_id() -> CandidateId {
    let id = CANDIDATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CandidateId(format!("cand-{id:06}"))
}

/// Facade composing the evaluator roster, the evaluation ledger, the stage
/// transition engine, and the batch ranker over a pluggable job repository.
///
/// Every operation loads a job snapshot, applies one mutation, and persists
/// the result; a failed operation writes nothing.
pub struct HiringPipelineService<R> {
    repository: Arc<R>,
    roster: EvaluatorRoster,
}

impl<R> HiringPipelineService<R>
where
    R: JobRepository + 'static,
{
    pub fn new(repository: Arc<R>, roster: EvaluatorRoster) -> Self {
        Self { repository, roster }
    }

    pub fn roster(&self) -> &EvaluatorRoster {
        &self.roster
    }

    pub fn create_job(
        &self,
        title: &str,
        department: &str,
        created_at: NaiveDate,
    ) -> Result<Job, PipelineServiceError> {
        let job = Job {
            id: next_job_id(),
            title: title.trim().to_string(),
            department: department.trim().to_string(),
            status: JobStatus::Active,
            created_at,
            candidates: Vec::new(),
        };
        let stored = self.repository.insert(job)?;
        Ok(stored)
    }

    pub fn get_job(&self, job_id: &JobId) -> Result<Job, PipelineServiceError> {
        let job = self
            .repository
            .fetch(job_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(job)
    }

    pub fn list_jobs(&self) -> Result<Vec<Job>, PipelineServiceError> {
        Ok(self.repository.list()?)
    }

    /// Manual applicant form: enters at OMOED with no marks and no
    /// AI-derived summary.
    pub fn add_applicant(
        &self,
        job_id: &JobId,
        name: &str,
        role: &str,
        applied_on: NaiveDate,
    ) -> Result<Candidate, PipelineServiceError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyCandidateName.into());
        }

        let mut job = self.get_job(job_id)?;
        let candidate = Candidate::new(
            next_candidate_id(),
            name.trim().to_string(),
            role.trim().to_string(),
            applied_on,
        );
        job.candidates.push(candidate.clone());
        self.repository.update(job)?;
        Ok(candidate)
    }

    /// Upsert one evaluator's mark and feedback, then recompute the overall
    /// score. Validation failures leave both the candidate and the store
    /// untouched.
    pub fn record_mark(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
        stage: Stage,
        evaluator: &str,
        mark: Option<i64>,
        feedback: Option<String>,
    ) -> Result<Candidate, PipelineServiceError> {
        let mut job = self.get_job(job_id)?;
        let candidate = job
            .candidate_mut(candidate_id)
            .ok_or_else(|| PipelineServiceError::UnknownCandidate(candidate_id.clone()))?;

        ledger::record_mark(candidate, stage, evaluator, mark, feedback)?;
        scoring::recompute_score(candidate);

        let updated = candidate.clone();
        self.repository.update(job)?;
        Ok(updated)
    }

    /// Confirm an interview, advancing the candidate into the next stage.
    /// The acting user becomes the default participant on the schedule.
    pub fn schedule_interview(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
        details: &ScheduleDetails,
        scheduled_by: &ActingUser,
    ) -> Result<Candidate, PipelineServiceError> {
        let mut job = self.get_job(job_id)?;
        let candidate = job
            .candidate_mut(candidate_id)
            .ok_or_else(|| PipelineServiceError::UnknownCandidate(candidate_id.clone()))?;

        engine::schedule_and_advance(candidate, details, scheduled_by)?;

        let updated = candidate.clone();
        self.repository.update(job)?;
        Ok(updated)
    }

    pub fn reject_candidate(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
    ) -> Result<Candidate, PipelineServiceError> {
        let mut job = self.get_job(job_id)?;
        let candidate = job
            .candidate_mut(candidate_id)
            .ok_or_else(|| PipelineServiceError::UnknownCandidate(candidate_id.clone()))?;

        engine::reject(candidate);

        let updated = candidate.clone();
        self.repository.update(job)?;
        Ok(updated)
    }

    /// Append a private note authored by the acting user.
    pub fn add_note(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
        content: &str,
        author: &ActingUser,
        noted_at: NaiveDateTime,
    ) -> Result<Candidate, PipelineServiceError> {
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyNote.into());
        }

        let mut job = self.get_job(job_id)?;
        let candidate = job
            .candidate_mut(candidate_id)
            .ok_or_else(|| PipelineServiceError::UnknownCandidate(candidate_id.clone()))?;

        candidate.private_notes.push(PrivateNote {
            author: author.name.clone(),
            noted_at,
            content: content.trim().to_string(),
        });

        let updated = candidate.clone();
        self.repository.update(job)?;
        Ok(updated)
    }

    /// Confirm a reviewed batch of AI-scored resumes: rank all of them,
    /// admit the top fifth into the job at OMOED, and persist. The returned
    /// admission carries the full ranked review for the operator.
    pub fn admit_batch(
        &self,
        job_id: &JobId,
        evaluations: Vec<SmarsEvaluation>,
        admitted_on: NaiveDate,
    ) -> Result<BatchAdmission, PipelineServiceError> {
        let mut job = self.get_job(job_id)?;
        let admission = ranker::admit_batch(evaluations, &job.title, admitted_on, next_candidate_id);

        job.candidates.extend(admission.admitted.iter().cloned());
        self.repository.update(job)?;

        tracing::info!(
            job_id = %job_id.0,
            reviewed = admission.ranked.len(),
            admitted = admission.admitted.len(),
            "resume batch admitted"
        );

        Ok(admission)
    }

    pub fn board(&self, job_id: &JobId) -> Result<BoardView, PipelineServiceError> {
        let job = self.get_job(job_id)?;
        Ok(BoardView::for_job(&self.roster, &job))
    }

    pub fn dashboard(&self, today: NaiveDate) -> Result<DashboardSummary, PipelineServiceError> {
        let jobs = self.list_jobs()?;
        Ok(DashboardSummary::for_jobs(&jobs, today))
    }

    pub fn calendar(
        &self,
    ) -> Result<BTreeMap<NaiveDate, Vec<InterviewSlot>>, PipelineServiceError> {
        let jobs = self.list_jobs()?;
        Ok(interview_calendar(&jobs))
    }
}

/// Error raised by the pipeline service.
#[derive(Debug, thiserror::Error)]
pub enum PipelineServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transition(#[from] InvalidTransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("candidate '{}' not found on this job", .0 .0)]
    UnknownCandidate(CandidateId),
}
