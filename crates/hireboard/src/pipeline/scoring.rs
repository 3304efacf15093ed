use super::domain::Candidate;

/// Recompute the candidate's overall score from every recorded mark across
/// all stages, rounded half-up.
///
/// With zero marks the existing score is left alone: a freshly admitted
/// candidate keeps their AI-assigned score until a real evaluator records
/// the first mark. Runs after every successful mark upsert.
pub fn recompute_score(candidate: &mut Candidate) {
    let marks: Vec<u8> = candidate
        .stage_marks
        .values()
        .flat_map(|stage_marks| stage_marks.values())
        .filter_map(|evaluation| evaluation.mark)
        .collect();

    if marks.is_empty() {
        return;
    }

    let sum: u32 = marks.iter().map(|mark| u32::from(*mark)).sum();
    let mean = f64::from(sum) / marks.len() as f64;
    candidate.score = mean.round() as u8;
}
