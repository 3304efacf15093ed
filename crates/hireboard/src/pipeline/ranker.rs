use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, PercentileBand, SmarsEvaluation, Stage};

/// Fraction of a ranked batch admitted into the pipeline at confirmation.
const ADMITTED_FRACTION: f64 = 0.20;

/// One evaluation positioned within its batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEvaluation {
    pub evaluation: SmarsEvaluation,
    /// 1-based position after the descending sort by overall score.
    pub rank: usize,
    pub percentile_of_batch: f64,
    pub band: PercentileBand,
}

/// Outcome of confirming a batch: what entered the pipeline and what was
/// reviewed but left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAdmission {
    pub ranked: Vec<RankedEvaluation>,
    pub admitted: Vec<Candidate>,
}

/// Rank a batch of AI-scored resumes, descending by overall score.
///
/// Ties keep their input order (stable sort, no secondary key). Every entry
/// is returned so the operator reviews the full batch before admission cuts
/// it down. The percentile is relative to this batch only and is frozen
/// onto whatever candidates are admitted from it.
pub fn rank_batch(evaluations: Vec<SmarsEvaluation>) -> Vec<RankedEvaluation> {
    let total = evaluations.len();
    let mut sorted = evaluations;
    sorted.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, evaluation)| {
            let rank = index + 1;
            let percentile_of_batch = (total - rank + 1) as f64 / total as f64 * 100.0;
            RankedEvaluation {
                evaluation,
                rank,
                percentile_of_batch,
                band: band_for(percentile_of_batch),
            }
        })
        .collect()
}

/// Thresholds are inclusive lower bounds, first match wins.
fn band_for(percentile_of_batch: f64) -> PercentileBand {
    if percentile_of_batch >= 95.0 {
        PercentileBand::Top5
    } else if percentile_of_batch >= 90.0 {
        PercentileBand::Top10
    } else if percentile_of_batch >= 80.0 {
        PercentileBand::Top20
    } else if percentile_of_batch >= 50.0 {
        PercentileBand::Top50
    } else {
        PercentileBand::Bottom50
    }
}

/// Confirm a reviewed batch: build candidates for every evaluation, then
/// admit only the top fifth (by the same sort order) into the pipeline.
///
/// Admitted candidates enter at OMOED with the AI score and summary carried
/// over and no marks recorded. The remainder exist only in the returned
/// review, never as candidates. An empty batch admits nothing.
pub fn admit_batch<F>(
    evaluations: Vec<SmarsEvaluation>,
    job_title: &str,
    admitted_on: NaiveDate,
    mut next_id: F,
) -> BatchAdmission
where
    F: FnMut() -> CandidateId,
{
    let ranked = rank_batch(evaluations);
    let admitted_count = (ranked.len() as f64 * ADMITTED_FRACTION).ceil() as usize;

    let admitted = ranked
        .iter()
        .take(admitted_count)
        .map(|entry| {
            let evaluation = &entry.evaluation;
            let mut candidate = Candidate::new(
                next_id(),
                evaluation.name.clone(),
                format!("Applicant for {job_title}"),
                admitted_on,
            );
            candidate.score = evaluation.overall_score.round().clamp(0.0, 100.0) as u8;
            candidate.stage = Stage::Omoed;
            candidate.summary_points = evaluation.points.clone();
            candidate.percentile_band = Some(entry.band);
            candidate
        })
        .collect();

    BatchAdmission { ranked, admitted }
}
