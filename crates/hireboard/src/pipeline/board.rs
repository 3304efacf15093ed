use serde::Serialize;

use super::domain::{Candidate, CandidateId, Job, PercentileBand, Stage};
use super::ledger::is_stage_complete;
use super::roster::EvaluatorRoster;

/// One kanban column: the candidates currently sitting at one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn {
    pub stage: Stage,
    pub candidates: Vec<Candidate>,
}

/// Group a job's candidates by stage for board rendering, one column per
/// non-terminal stage in pipeline order. Hired and rejected candidates stay
/// on the job's list but are never boarded.
pub fn project(job: &Job) -> Vec<StageColumn> {
    Stage::ordered()
        .into_iter()
        .map(|stage| StageColumn {
            stage,
            candidates: job
                .candidates
                .iter()
                .filter(|candidate| candidate.stage == stage)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Candidates split by whether their stage's marks are all in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagePartition {
    pub in_progress: Vec<Candidate>,
    pub completed: Vec<Candidate>,
}

/// Partition one column's candidates by stage completeness. OMOED has no
/// evaluators, so its column renders as a single undivided list and callers
/// skip this partition for it.
pub fn partition(
    roster: &EvaluatorRoster,
    candidates: &[Candidate],
    stage: Stage,
) -> StagePartition {
    let mut split = StagePartition::default();
    for candidate in candidates {
        if is_stage_complete(roster, candidate, stage) {
            split.completed.push(candidate.clone());
        } else {
            split.in_progress.push(candidate.clone());
        }
    }
    split
}

/// Serializable card for one candidate on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateCard {
    pub id: CandidateId,
    pub name: String,
    pub role: String,
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_band: Option<PercentileBand>,
    pub has_upcoming_schedule: bool,
}

impl CandidateCard {
    fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            role: candidate.role.clone(),
            score: candidate.score,
            percentile_band: candidate.percentile_band,
            has_upcoming_schedule: candidate.upcoming_schedule.is_some(),
        }
    }
}

/// Serializable board column with the in-progress/completed split applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardColumn {
    pub stage: Stage,
    pub title: &'static str,
    /// False for the OMOED column, which is always a single list.
    pub partitioned: bool,
    pub in_progress: Vec<CandidateCard>,
    pub completed: Vec<CandidateCard>,
}

/// Full board view for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub job_id: super::domain::JobId,
    pub columns: Vec<BoardColumn>,
}

impl BoardView {
    pub fn for_job(roster: &EvaluatorRoster, job: &Job) -> Self {
        let columns = project(job)
            .into_iter()
            .map(|column| {
                if column.stage == Stage::Omoed {
                    BoardColumn {
                        stage: column.stage,
                        title: column.stage.label(),
                        partitioned: false,
                        in_progress: column
                            .candidates
                            .iter()
                            .map(CandidateCard::from_candidate)
                            .collect(),
                        completed: Vec::new(),
                    }
                } else {
                    let split = partition(roster, &column.candidates, column.stage);
                    BoardColumn {
                        stage: column.stage,
                        title: column.stage.label(),
                        partitioned: true,
                        in_progress: split
                            .in_progress
                            .iter()
                            .map(CandidateCard::from_candidate)
                            .collect(),
                        completed: split
                            .completed
                            .iter()
                            .map(CandidateCard::from_candidate)
                            .collect(),
                    }
                }
            })
            .collect();

        Self {
            job_id: job.id.clone(),
            columns,
        }
    }
}
