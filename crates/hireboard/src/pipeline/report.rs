use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::domain::{CandidateId, Job, JobId, JobStatus, Stage};

/// Candidate count for one pipeline stage, in board order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub stage_label: &'static str,
    pub count: usize,
}

/// Applicant volume for one trailing month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyActivity {
    /// `YYYY-MM` key the month buckets on.
    pub month: String,
    pub applicants: usize,
    pub hired: usize,
}

/// One scheduled interview surfaced on the dashboard or calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewSlot {
    pub job_id: JobId,
    pub job_title: String,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub stage: Stage,
    pub starts_at: NaiveDateTime,
    pub platform: String,
}

/// Headline numbers for the landing dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_candidates: usize,
    pub hired_candidates: usize,
    pub pipeline: Vec<StageCount>,
    pub monthly_activity: Vec<MonthlyActivity>,
    pub upcoming_interviews: Vec<InterviewSlot>,
}

impl DashboardSummary {
    /// Derive the dashboard from a snapshot of every job. Pipeline counts
    /// cover the four non-terminal stages; activity covers the six months
    /// ending with `today`'s month; interviews are sorted soonest first.
    pub fn for_jobs(jobs: &[Job], today: NaiveDate) -> Self {
        let candidates: Vec<(&Job, &super::domain::Candidate)> = jobs
            .iter()
            .flat_map(|job| job.candidates.iter().map(move |candidate| (job, candidate)))
            .collect();

        let pipeline = Stage::ordered()
            .into_iter()
            .map(|stage| StageCount {
                stage,
                stage_label: stage.label(),
                count: candidates
                    .iter()
                    .filter(|(_, candidate)| candidate.stage == stage)
                    .count(),
            })
            .collect();

        let months = trailing_months(today, 6);
        let monthly_activity = months
            .into_iter()
            .map(|month| {
                let in_month = candidates
                    .iter()
                    .filter(|(_, candidate)| month_key(candidate.applied_date) == month);
                let mut applicants = 0;
                let mut hired = 0;
                for (_, candidate) in in_month {
                    applicants += 1;
                    if candidate.stage == Stage::Hired {
                        hired += 1;
                    }
                }
                MonthlyActivity {
                    month,
                    applicants,
                    hired,
                }
            })
            .collect();

        let mut upcoming_interviews: Vec<InterviewSlot> = candidates
            .iter()
            .filter_map(|(job, candidate)| {
                candidate
                    .upcoming_schedule
                    .as_ref()
                    .map(|schedule| InterviewSlot {
                        job_id: job.id.clone(),
                        job_title: job.title.clone(),
                        candidate_id: candidate.id.clone(),
                        candidate_name: candidate.name.clone(),
                        stage: candidate.stage,
                        starts_at: schedule.starts_at,
                        platform: schedule.platform.clone(),
                    })
            })
            .collect();
        upcoming_interviews.sort_by_key(|slot| slot.starts_at);

        Self {
            total_jobs: jobs.len(),
            active_jobs: jobs
                .iter()
                .filter(|job| job.status == JobStatus::Active)
                .count(),
            total_candidates: candidates.len(),
            hired_candidates: candidates
                .iter()
                .filter(|(_, candidate)| candidate.stage == Stage::Hired)
                .count(),
            pipeline,
            monthly_activity,
            upcoming_interviews,
        }
    }
}

/// Scheduled interviews grouped by day for the calendar view.
pub fn interview_calendar(jobs: &[Job]) -> BTreeMap<NaiveDate, Vec<InterviewSlot>> {
    let mut calendar: BTreeMap<NaiveDate, Vec<InterviewSlot>> = BTreeMap::new();

    for job in jobs {
        for candidate in &job.candidates {
            let Some(schedule) = &candidate.upcoming_schedule else {
                continue;
            };
            calendar
                .entry(schedule.starts_at.date())
                .or_default()
                .push(InterviewSlot {
                    job_id: job.id.clone(),
                    job_title: job.title.clone(),
                    candidate_id: candidate.id.clone(),
                    candidate_name: candidate.name.clone(),
                    stage: candidate.stage,
                    starts_at: schedule.starts_at,
                    platform: schedule.platform.clone(),
                });
        }
    }

    for slots in calendar.values_mut() {
        slots.sort_by_key(|slot| slot.starts_at);
    }

    calendar
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// `count` month keys ending with the month containing `today`, oldest
/// first.
fn trailing_months(today: NaiveDate, count: u32) -> Vec<String> {
    let mut year = today.year();
    let mut month = today.month();
    let mut keys = Vec::with_capacity(count as usize);

    for _ in 0..count {
        keys.push(format!("{year:04}-{month:02}"));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }

    keys.reverse();
    keys
}
