use super::domain::{ActingUser, Candidate, ScheduleDetails, Stage, UpcomingSchedule};

/// Raised when an advance is attempted from a stage with no successor.
/// Surfaced to callers as a warning and a no-op, never a crash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no next stage is defined after {stage}")]
pub struct InvalidTransitionError {
    pub stage: Stage,
}

/// Position of the candidate's stage in the ordered pipeline, for progress
/// rendering. Terminal stages sit one past the end; the stage held at
/// rejection is kept separately on the candidate (`stage_at_rejection`).
pub fn current_index(candidate: &Candidate) -> usize {
    let stages = Stage::ordered();
    if candidate.stage.is_terminal() {
        return stages.len();
    }
    stages
        .iter()
        .position(|stage| *stage == candidate.stage)
        .unwrap_or(stages.len())
}

/// Confirm an interview and advance the candidate into the next stage.
///
/// This is the only path past OMOED: having every mark recorded never moves
/// a candidate on its own; the scheduled interview for the *next* stage
/// does. Fails without mutation when the current stage has no successor
/// (final interview or a terminal stage).
pub fn schedule_and_advance(
    candidate: &mut Candidate,
    details: &ScheduleDetails,
    scheduled_by: &ActingUser,
) -> Result<(), InvalidTransitionError> {
    let next = candidate.stage.next().ok_or(InvalidTransitionError {
        stage: candidate.stage,
    })?;

    candidate.stage = next;
    candidate.upcoming_schedule = Some(UpcomingSchedule {
        title: next.label().to_string(),
        starts_at: details.starts_at(),
        platform: details.platform.clone(),
        participants: vec![scheduled_by.as_participant()],
    });

    Ok(())
}

/// Move the candidate to the terminal rejected stage.
///
/// Unconditional and idempotent: rejecting an already-rejected candidate is
/// a no-op. The first rejection records the stage the candidate held so the
/// decision stays auditable.
pub fn reject(candidate: &mut Candidate) {
    if candidate.stage == Stage::Rejected {
        return;
    }

    candidate.stage_at_rejection = Some(candidate.stage);
    candidate.stage = Stage::Rejected;
}
