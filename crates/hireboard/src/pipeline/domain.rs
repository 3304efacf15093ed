use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidates; unique within one job's candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for job requisitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// One step of the fixed hiring pipeline, plus the two terminal outcomes.
///
/// The ordering of the non-terminal variants is the pipeline order; it drives
/// `ordered()`, `next()`, and the board column layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Omoed,
    Screening,
    TechnicalTest,
    FinalInterview,
    Hired,
    Rejected,
}

impl Stage {
    /// The non-terminal stages in pipeline order.
    pub const fn ordered() -> [Stage; 4] {
        [
            Stage::Omoed,
            Stage::Screening,
            Stage::TechnicalTest,
            Stage::FinalInterview,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Stage::Omoed => "OMOED",
            Stage::Screening => "SCREENING",
            Stage::TechnicalTest => "TECHNICAL_TEST",
            Stage::FinalInterview => "FINAL_INTERVIEW",
            Stage::Hired => "HIRED",
            Stage::Rejected => "REJECTED",
        }
    }

    pub fn from_label(value: &str) -> Option<Stage> {
        match value.trim() {
            "OMOED" => Some(Stage::Omoed),
            "SCREENING" => Some(Stage::Screening),
            "TECHNICAL_TEST" => Some(Stage::TechnicalTest),
            "FINAL_INTERVIEW" => Some(Stage::FinalInterview),
            "HIRED" => Some(Stage::Hired),
            "REJECTED" => Some(Stage::Rejected),
            _ => None,
        }
    }

    /// The successor stage a schedule confirmation advances into, when one
    /// exists. `FinalInterview` and the terminal stages have none.
    pub const fn next(self) -> Option<Stage> {
        match self {
            Stage::Omoed => Some(Stage::Screening),
            Stage::Screening => Some(Stage::TechnicalTest),
            Stage::TechnicalTest => Some(Stage::FinalInterview),
            Stage::FinalInterview | Stage::Hired | Stage::Rejected => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Stage::Hired | Stage::Rejected)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single evaluator's saved mark and feedback for one stage.
///
/// Saved as a pair: an upsert replaces both fields rather than merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEvaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Marks keyed by evaluator name for one stage.
pub type StageMarks = BTreeMap<String, StageEvaluation>;

/// Sentiment attached to one AI summary bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointStatus {
    Positive,
    Neutral,
    Negative,
}

/// One bullet from the AI resume evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPoint {
    pub text: String,
    pub status: PointStatus,
}

/// Coarse percentile bucket assigned once at batch admission.
///
/// A snapshot of the admitting batch, never recomputed as later batches
/// arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentileBand {
    #[serde(rename = "Top 5%")]
    Top5,
    #[serde(rename = "Top 10%")]
    Top10,
    #[serde(rename = "Top 20%")]
    Top20,
    #[serde(rename = "Top 50%")]
    Top50,
    #[serde(rename = "Bottom 50%")]
    Bottom50,
}

impl PercentileBand {
    pub const fn label(self) -> &'static str {
        match self {
            PercentileBand::Top5 => "Top 5%",
            PercentileBand::Top10 => "Top 10%",
            PercentileBand::Top20 => "Top 20%",
            PercentileBand::Top50 => "Top 50%",
            PercentileBand::Bottom50 => "Bottom 50%",
        }
    }
}

/// Somebody attending an interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// The interview pending for the candidate's current stage, when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingSchedule {
    pub title: String,
    pub starts_at: NaiveDateTime,
    pub platform: String,
    pub participants: Vec<Participant>,
}

/// Team-internal note attached to a candidate; the list is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateNote {
    pub author: String,
    pub noted_at: NaiveDateTime,
    pub content: String,
}

/// The operator performing a mutation; threaded through every mutating call
/// so note authors and default schedule participants are never baked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    pub name: String,
    pub role: String,
}

impl ActingUser {
    pub fn as_participant(&self) -> Participant {
        Participant {
            name: self.name.clone(),
            role: self.role.clone(),
            avatar_url: None,
        }
    }
}

/// A person progressing through one job's pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub role: String,
    /// Aggregate of all recorded marks, or the AI-assigned score until a
    /// real evaluator overrides it. Always 0..=100.
    pub score: u8,
    pub stage: Stage,
    /// The stage the candidate held when rejected; kept for auditability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_at_rejection: Option<Stage>,
    #[serde(default)]
    pub stage_marks: BTreeMap<Stage, StageMarks>,
    #[serde(default)]
    pub summary_points: Vec<SummaryPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_band: Option<PercentileBand>,
    pub applied_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming_schedule: Option<UpcomingSchedule>,
    #[serde(default)]
    pub private_notes: Vec<PrivateNote>,
}

impl Candidate {
    /// A fresh applicant entering the pipeline at the automated stage with
    /// no marks recorded.
    pub fn new(id: CandidateId, name: String, role: String, applied_date: NaiveDate) -> Self {
        Self {
            id,
            name,
            role,
            score: 0,
            stage: Stage::Omoed,
            stage_at_rejection: None,
            stage_marks: BTreeMap::new(),
            summary_points: Vec::new(),
            percentile_band: None,
            applied_date,
            email: None,
            phone: None,
            upcoming_schedule: None,
            private_notes: Vec::new(),
        }
    }

    /// The saved evaluation for one (stage, evaluator) pair, if any.
    pub fn evaluation(&self, stage: Stage, evaluator: &str) -> Option<&StageEvaluation> {
        self.stage_marks.get(&stage)?.get(evaluator)
    }
}

/// Category scores produced by the resume screening model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub hr: f32,
    pub tech: f32,
    pub culture: f32,
}

/// One AI-scored resume awaiting operator review; never persisted as a
/// candidate until admitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmarsEvaluation {
    pub name: String,
    pub role: String,
    pub scores: CategoryScores,
    pub overall_score: f32,
    #[serde(default)]
    pub points: Vec<SummaryPoint>,
}

/// Requisition lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Active,
    Inactive,
    Closed,
    Draft,
}

/// A requisition owning an ordered list of candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub department: String,
    pub status: JobStatus,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl Job {
    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| &candidate.id == id)
    }

    pub fn candidate_mut(&mut self, id: &CandidateId) -> Option<&mut Candidate> {
        self.candidates
            .iter_mut()
            .find(|candidate| &candidate.id == id)
    }
}

/// Operator-supplied interview details, validated at the ingest boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDetails {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub platform: String,
}

impl ScheduleDetails {
    /// Parse the raw form input (`YYYY-MM-DD`, 24h `HH:MM`). Missing or
    /// malformed fields abort before any candidate is touched.
    pub fn parse(
        date: Option<&str>,
        time: Option<&str>,
        platform: &str,
    ) -> Result<Self, ValidationError> {
        let raw_date = date
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingScheduleDate)?;
        let raw_time = time
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingScheduleTime)?;

        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidScheduleDate(raw_date.to_string()))?;
        let time = NaiveTime::parse_from_str(raw_time, "%H:%M")
            .map_err(|_| ValidationError::InvalidScheduleTime(raw_time.to_string()))?;

        Ok(Self {
            date,
            time,
            platform: platform.trim().to_string(),
        })
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Rejected input; the triggering operation aborts with no mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("mark must be an integer between 0 and 100, got {0}")]
    MarkOutOfRange(i64),
    #[error("marks cannot be recorded for terminal stage {0}")]
    MarkOnTerminalStage(Stage),
    #[error("candidate has not reached stage {0}")]
    StageNotReached(Stage),
    #[error("an interview date is required (YYYY-MM-DD)")]
    MissingScheduleDate,
    #[error("an interview time is required (24h HH:MM)")]
    MissingScheduleTime,
    #[error("invalid interview date '{0}', expected YYYY-MM-DD")]
    InvalidScheduleDate(String),
    #[error("invalid interview time '{0}', expected 24h HH:MM")]
    InvalidScheduleTime(String),
    #[error("note content must not be empty")]
    EmptyNote,
    #[error("candidate name must not be empty")]
    EmptyCandidateName,
}
