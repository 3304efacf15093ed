//! Hiring pipeline core: candidates progressing through a fixed sequence of
//! stages, a per-stage evaluation ledger, schedule-gated transitions, batch
//! percentile ranking, and the kanban board projection rendered from it all.
//!
//! The service facade in [`service`] composes the pieces over a pluggable
//! [`repository::JobRepository`]; [`router`] exposes them over HTTP.

pub mod board;
pub mod domain;
pub mod engine;
pub mod ledger;
pub mod ranker;
pub mod report;
pub mod repository;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use board::{BoardColumn, BoardView, CandidateCard, StageColumn, StagePartition};
pub use domain::{
    ActingUser, Candidate, CandidateId, CategoryScores, Job, JobId, JobStatus, Participant,
    PercentileBand, PointStatus, PrivateNote, ScheduleDetails, SmarsEvaluation, Stage,
    StageEvaluation, StageMarks, SummaryPoint, UpcomingSchedule, ValidationError,
};
pub use engine::InvalidTransitionError;
pub use ranker::{BatchAdmission, RankedEvaluation};
pub use report::{DashboardSummary, InterviewSlot, MonthlyActivity, StageCount};
pub use repository::{CandidateStatusView, JobRepository, JobStatusView, RepositoryError};
pub use roster::{Evaluator, EvaluatorRoster};
pub use router::pipeline_router;
pub use service::{HiringPipelineService, PipelineServiceError};
