use chrono::NaiveDate;
use serde::Deserialize;

use crate::pipeline::domain::{Candidate, CandidateId, Stage};

/// Strip BOM and zero-width characters and collapse runs of whitespace.
/// Every externally sourced name passes through here exactly once.
pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A candidate record as older exports and external feeds deliver it, with
/// the field aliases those sources used.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCandidateRecord {
    #[serde(alias = "candidateName")]
    pub name: String,
    #[serde(default, alias = "position")]
    pub role: Option<String>,
    #[serde(default, alias = "currentStage")]
    pub stage: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default, alias = "appliedDate")]
    pub applied_date: Option<NaiveDate>,
    #[serde(default, alias = "emailAddress")]
    pub email: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    pub phone: Option<String>,
}

impl RawCandidateRecord {
    /// Map a raw record to a [`Candidate`] at the ingest boundary. Records
    /// without a stage enter at the automated stage; records without an
    /// applied date take `default_applied_date`.
    pub fn normalize(
        self,
        id: CandidateId,
        default_applied_date: NaiveDate,
    ) -> Result<Candidate, NormalizeError> {
        let name = normalize_name(&self.name);
        if name.is_empty() {
            return Err(NormalizeError::MissingName);
        }

        let stage = match self.stage.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => Stage::Omoed,
            Some(raw) => {
                Stage::from_label(raw).ok_or_else(|| NormalizeError::UnknownStage(raw.to_string()))?
            }
        };

        let role = self
            .role
            .as_deref()
            .map(normalize_name)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "Applicant".to_string());

        let mut candidate = Candidate::new(
            id,
            name,
            role,
            self.applied_date.unwrap_or(default_applied_date),
        );
        candidate.stage = stage;
        candidate.score = self.score.unwrap_or(0).clamp(0, 100) as u8;
        candidate.email = self.email.filter(|value| !value.trim().is_empty());
        candidate.phone = self.phone.filter(|value| !value.trim().is_empty());
        Ok(candidate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("candidate record has no name")]
    MissingName,
    #[error("unknown pipeline stage '{0}'")]
    UnknownStage(String),
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_name(value)
}
