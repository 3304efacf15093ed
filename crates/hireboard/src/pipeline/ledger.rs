use super::domain::{Candidate, Stage, StageEvaluation, ValidationError};
use super::roster::EvaluatorRoster;

/// Upsert one evaluator's evaluation for one stage.
///
/// The mark, when supplied, must be an integer in 0..=100; anything else
/// aborts before the candidate is touched. Marks may only target stages the
/// candidate has reached or currently holds, never terminal stages or
/// stages still ahead. The saved evaluation is replaced wholesale: callers
/// resupply both mark and feedback on re-edit, so a save with an absent
/// mark clears a previously recorded one.
pub fn record_mark(
    candidate: &mut Candidate,
    stage: Stage,
    evaluator: &str,
    mark: Option<i64>,
    feedback: Option<String>,
) -> Result<(), ValidationError> {
    let mark = match mark {
        Some(value) if !(0..=100).contains(&value) => {
            return Err(ValidationError::MarkOutOfRange(value))
        }
        Some(value) => Some(value as u8),
        None => None,
    };

    let Some(target) = Stage::ordered().iter().position(|step| *step == stage) else {
        return Err(ValidationError::MarkOnTerminalStage(stage));
    };
    if reached_index(candidate).map_or(true, |limit| target > limit) {
        return Err(ValidationError::StageNotReached(stage));
    }

    let feedback = feedback.filter(|text| !text.trim().is_empty());

    candidate
        .stage_marks
        .entry(stage)
        .or_default()
        .insert(evaluator.to_string(), StageEvaluation { mark, feedback });

    Ok(())
}

/// Index of the furthest stage marks may target. A hired candidate walked
/// the whole pipeline; a rejected one stops at the stage held when
/// rejection happened.
fn reached_index(candidate: &Candidate) -> Option<usize> {
    let stage = match candidate.stage {
        Stage::Rejected => candidate.stage_at_rejection?,
        Stage::Hired => Stage::FinalInterview,
        current => current,
    };
    Stage::ordered().iter().position(|step| *step == stage)
}

/// A stage is complete when its roster is non-empty and every roster
/// evaluator has a recorded mark; feedback alone does not count. Stages
/// without evaluators (OMOED, terminals) are never complete by marks --
/// admission drives them instead.
///
/// Completeness feeds the board partition only; it never advances a
/// candidate. Scheduling the next interview does.
pub fn is_stage_complete(roster: &EvaluatorRoster, candidate: &Candidate, stage: Stage) -> bool {
    let evaluators = roster.evaluators_for(stage, candidate);
    if evaluators.is_empty() {
        return false;
    }

    let Some(marks) = candidate.stage_marks.get(&stage) else {
        return false;
    };

    evaluators.iter().all(|evaluator| {
        marks
            .get(&evaluator.name)
            .is_some_and(|evaluation| evaluation.mark.is_some())
    })
}
