use std::sync::Arc;

use super::common::*;
use crate::pipeline::domain::{CandidateId, Stage, ValidationError};
use crate::pipeline::repository::RepositoryError;
use crate::pipeline::roster::EvaluatorRoster;
use crate::pipeline::service::{HiringPipelineService, PipelineServiceError};

#[test]
fn create_job_persists_and_fetches() {
    let (service, _repository) = build_service();

    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");
    let fetched = service.get_job(&job.id).expect("fetch job");

    assert_eq!(fetched.title, "Backend Engineer");
    assert!(fetched.candidates.is_empty());
    assert!(job.id.0.starts_with("job-"));
}

#[test]
fn fetching_a_missing_job_reports_not_found() {
    let (service, _repository) = build_service();

    let error = service
        .get_job(&crate::pipeline::domain::JobId("job-missing".to_string()))
        .expect_err("missing job");

    match error {
        PipelineServiceError::Repository(RepositoryError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn add_applicant_rejects_blank_names() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");

    let error = service
        .add_applicant(&job.id, "   ", "Engineer", applied())
        .expect_err("blank name");

    match error {
        PipelineServiceError::Validation(ValidationError::EmptyCandidateName) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
    let fetched = service.get_job(&job.id).expect("fetch job");
    assert!(fetched.candidates.is_empty());
}

#[test]
fn record_mark_persists_the_recomputed_score() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");
    let candidate = service
        .add_applicant(&job.id, "Sarah Miller", "Engineer", applied())
        .expect("add applicant");
    for _ in 0..2 {
        service
            .schedule_interview(&job.id, &candidate.id, &schedule_details(), &acting_user())
            .expect("advance");
    }

    service
        .record_mark(
            &job.id,
            &candidate.id,
            Stage::Screening,
            "Lee Wei Song",
            Some(70),
            None,
        )
        .expect("first mark");
    let updated = service
        .record_mark(
            &job.id,
            &candidate.id,
            Stage::TechnicalTest,
            "Andrew Sebastian",
            Some(75),
            Some("Thorough".to_string()),
        )
        .expect("second mark");

    assert_eq!(updated.score, 73);
    let stored = service.get_job(&job.id).expect("fetch job");
    let stored_candidate = stored.candidate(&candidate.id).expect("candidate present");
    assert_eq!(stored_candidate.score, 73);
    assert_eq!(
        stored_candidate
            .evaluation(Stage::TechnicalTest, "Andrew Sebastian")
            .and_then(|e| e.feedback.as_deref()),
        Some("Thorough")
    );
}

#[test]
fn an_invalid_mark_leaves_the_store_untouched() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");
    let candidate = service
        .add_applicant(&job.id, "Sarah Miller", "Engineer", applied())
        .expect("add applicant");

    let error = service
        .record_mark(
            &job.id,
            &candidate.id,
            Stage::Screening,
            "Lee Wei Song",
            Some(150),
            None,
        )
        .expect_err("mark out of range");

    match error {
        PipelineServiceError::Validation(ValidationError::MarkOutOfRange(150)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
    let stored = service.get_job(&job.id).expect("fetch job");
    let stored_candidate = stored.candidate(&candidate.id).expect("candidate present");
    assert!(stored_candidate.stage_marks.is_empty());
    assert_eq!(stored_candidate.score, 0);
}

#[test]
fn a_mark_for_a_stage_ahead_never_reaches_the_store() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");
    let candidate = service
        .add_applicant(&job.id, "Sarah Miller", "Engineer", applied())
        .expect("add applicant");

    let error = service
        .record_mark(
            &job.id,
            &candidate.id,
            Stage::FinalInterview,
            "Lee Wei Song",
            Some(95),
            None,
        )
        .expect_err("candidate is still at the automated stage");

    match error {
        PipelineServiceError::Validation(ValidationError::StageNotReached(Stage::FinalInterview)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
    let stored = service.get_job(&job.id).expect("fetch job");
    let stored_candidate = stored.candidate(&candidate.id).expect("candidate present");
    assert!(stored_candidate.stage_marks.is_empty());
    assert_eq!(stored_candidate.score, 0);
}

#[test]
fn scheduling_walks_the_pipeline_and_stops_at_the_end() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");
    let candidate = service
        .add_applicant(&job.id, "Sarah Miller", "Engineer", applied())
        .expect("add applicant");

    for expected in [Stage::Screening, Stage::TechnicalTest, Stage::FinalInterview] {
        let updated = service
            .schedule_interview(&job.id, &candidate.id, &schedule_details(), &acting_user())
            .expect("advance");
        assert_eq!(updated.stage, expected);
    }

    let error = service
        .schedule_interview(&job.id, &candidate.id, &schedule_details(), &acting_user())
        .expect_err("nothing after the final interview");
    match error {
        PipelineServiceError::Transition(transition) => {
            assert_eq!(transition.stage, Stage::FinalInterview);
        }
        other => panic!("expected transition error, got {other:?}"),
    }
    let stored = service.get_job(&job.id).expect("fetch job");
    let stored_candidate = stored.candidate(&candidate.id).expect("candidate present");
    assert_eq!(stored_candidate.stage, Stage::FinalInterview);
}

#[test]
fn rejecting_twice_changes_nothing() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");
    let candidate = service
        .add_applicant(&job.id, "Sarah Miller", "Engineer", applied())
        .expect("add applicant");
    service
        .schedule_interview(&job.id, &candidate.id, &schedule_details(), &acting_user())
        .expect("advance to screening");

    let rejected = service
        .reject_candidate(&job.id, &candidate.id)
        .expect("first rejection");
    assert_eq!(rejected.stage, Stage::Rejected);
    assert_eq!(rejected.stage_at_rejection, Some(Stage::Screening));

    let again = service
        .reject_candidate(&job.id, &candidate.id)
        .expect("second rejection");
    assert_eq!(again, rejected);
}

#[test]
fn notes_are_appended_with_the_acting_user_as_author() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");
    let candidate = service
        .add_applicant(&job.id, "Sarah Miller", "Engineer", applied())
        .expect("add applicant");
    let noted_at = applied().and_hms_opt(9, 30, 0).expect("valid time");

    let updated = service
        .add_note(&job.id, &candidate.id, "Strong referral", &acting_user(), noted_at)
        .expect("add note");

    assert_eq!(updated.private_notes.len(), 1);
    assert_eq!(updated.private_notes[0].author, "Maya Tan");
    assert_eq!(updated.private_notes[0].content, "Strong referral");

    let error = service
        .add_note(&job.id, &candidate.id, "  ", &acting_user(), noted_at)
        .expect_err("blank note");
    match error {
        PipelineServiceError::Validation(ValidationError::EmptyNote) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn admitting_a_batch_appends_only_the_top_fraction() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");

    let admission = service
        .admit_batch(
            &job.id,
            batch(&[90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0]),
            applied(),
        )
        .expect("admit batch");

    assert_eq!(admission.ranked.len(), 7);
    assert_eq!(admission.admitted.len(), 2);
    let stored = service.get_job(&job.id).expect("fetch job");
    assert_eq!(stored.candidates.len(), 2);
    assert!(stored
        .candidates
        .iter()
        .all(|candidate| candidate.stage == Stage::Omoed));
    assert!(stored
        .candidates
        .iter()
        .all(|candidate| candidate.percentile_band.is_some()));
}

#[test]
fn operations_on_an_unknown_candidate_report_it() {
    let (service, _repository) = build_service();
    let job = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect("create job");

    let error = service
        .reject_candidate(&job.id, &CandidateId("cand-unknown".to_string()))
        .expect_err("unknown candidate");

    match error {
        PipelineServiceError::UnknownCandidate(id) => assert_eq!(id.0, "cand-unknown"),
        other => panic!("expected unknown candidate, got {other:?}"),
    }
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let service =
        HiringPipelineService::new(Arc::new(UnavailableRepository), EvaluatorRoster::standard());

    let error = service
        .create_job("Backend Engineer", "Engineering", applied())
        .expect_err("repository offline");

    match error {
        PipelineServiceError::Repository(RepositoryError::Unavailable(_)) => {}
        other => panic!("expected unavailable, got {other:?}"),
    }
}
