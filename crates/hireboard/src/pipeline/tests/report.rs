use chrono::NaiveDate;

use super::common::*;
use crate::pipeline::domain::{JobId, JobStatus, Participant, Stage, UpcomingSchedule};
use crate::pipeline::report::{interview_calendar, DashboardSummary};

fn scheduled(suffix: &str, stage: Stage, starts_at: chrono::NaiveDateTime) -> crate::pipeline::domain::Candidate {
    let mut candidate = candidate(suffix);
    candidate.stage = stage;
    candidate.upcoming_schedule = Some(UpcomingSchedule {
        title: stage.label().to_string(),
        starts_at,
        platform: "Zoom".to_string(),
        participants: vec![Participant {
            name: "Maya Tan".to_string(),
            role: "Recruiter".to_string(),
            avatar_url: None,
        }],
    });
    candidate
}

#[test]
fn dashboard_counts_jobs_candidates_and_stages() {
    let mut hired = candidate("r-hired");
    hired.stage = Stage::Hired;
    let mut screening = candidate("r-screening");
    screening.stage = Stage::Screening;
    let mut active_job = job_with_candidates(vec![candidate("r-omoed"), screening, hired]);
    active_job.id = JobId("job-a".to_string());
    let mut closed_job = job_with_candidates(Vec::new());
    closed_job.id = JobId("job-b".to_string());
    closed_job.status = JobStatus::Closed;

    let today = NaiveDate::from_ymd_opt(2026, 2, 15).expect("valid date");
    let summary = DashboardSummary::for_jobs(&[active_job, closed_job], today);

    assert_eq!(summary.total_jobs, 2);
    assert_eq!(summary.active_jobs, 1);
    assert_eq!(summary.total_candidates, 3);
    assert_eq!(summary.hired_candidates, 1);
    assert_eq!(summary.pipeline.len(), 4);
    assert_eq!(summary.pipeline[0].stage, Stage::Omoed);
    assert_eq!(summary.pipeline[0].count, 1);
    assert_eq!(summary.pipeline[1].count, 1);
    assert_eq!(summary.pipeline[2].count, 0);
}

#[test]
fn dashboard_buckets_activity_into_the_trailing_six_months() {
    let mut january = candidate("r-jan");
    january.applied_date = NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date");
    let mut december = candidate("r-dec");
    december.applied_date = NaiveDate::from_ymd_opt(2025, 12, 3).expect("valid date");
    december.stage = Stage::Hired;
    let mut stale = candidate("r-stale");
    stale.applied_date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
    let job = job_with_candidates(vec![january, december, stale]);

    let today = NaiveDate::from_ymd_opt(2026, 2, 15).expect("valid date");
    let summary = DashboardSummary::for_jobs(&[job], today);

    assert_eq!(summary.monthly_activity.len(), 6);
    assert_eq!(summary.monthly_activity[0].month, "2025-09");
    assert_eq!(summary.monthly_activity[5].month, "2026-02");
    let december_bucket = summary
        .monthly_activity
        .iter()
        .find(|bucket| bucket.month == "2025-12")
        .expect("december bucket");
    assert_eq!(december_bucket.applicants, 1);
    assert_eq!(december_bucket.hired, 1);
    // June 2025 falls outside the window entirely
    let total: usize = summary
        .monthly_activity
        .iter()
        .map(|bucket| bucket.applicants)
        .sum();
    assert_eq!(total, 2);
}

#[test]
fn dashboard_sorts_upcoming_interviews_soonest_first() {
    let later = NaiveDate::from_ymd_opt(2026, 3, 12)
        .expect("valid date")
        .and_hms_opt(9, 0, 0)
        .expect("valid time");
    let sooner = NaiveDate::from_ymd_opt(2026, 3, 10)
        .expect("valid date")
        .and_hms_opt(14, 0, 0)
        .expect("valid time");
    let job = job_with_candidates(vec![
        scheduled("r-later", Stage::TechnicalTest, later),
        scheduled("r-sooner", Stage::Screening, sooner),
    ]);

    let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
    let summary = DashboardSummary::for_jobs(&[job], today);

    assert_eq!(summary.upcoming_interviews.len(), 2);
    assert_eq!(summary.upcoming_interviews[0].candidate_name, "Candidate r-sooner");
    assert_eq!(summary.upcoming_interviews[1].candidate_name, "Candidate r-later");
}

#[test]
fn calendar_groups_interviews_by_day() {
    let day = NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date");
    let morning = day.and_hms_opt(9, 0, 0).expect("valid time");
    let afternoon = day.and_hms_opt(15, 0, 0).expect("valid time");
    let other_day = NaiveDate::from_ymd_opt(2026, 3, 11)
        .expect("valid date")
        .and_hms_opt(11, 0, 0)
        .expect("valid time");
    let job = job_with_candidates(vec![
        scheduled("r-pm", Stage::Screening, afternoon),
        scheduled("r-am", Stage::Screening, morning),
        scheduled("r-next", Stage::TechnicalTest, other_day),
        candidate("r-none"),
    ]);

    let calendar = interview_calendar(&[job]);

    assert_eq!(calendar.len(), 2);
    let first_day = calendar.get(&day).expect("two slots on the first day");
    assert_eq!(first_day.len(), 2);
    assert_eq!(first_day[0].candidate_name, "Candidate r-am");
    assert_eq!(first_day[1].candidate_name, "Candidate r-pm");
}
