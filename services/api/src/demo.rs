use crate::infra::InMemoryJobRepository;
use chrono::{Local, NaiveDate};
use clap::Args;
use hireboard::error::AppError;
use hireboard::intake::{RawCandidateRecord, ResumeBatchImporter};
use hireboard::pipeline::{
    ranker, ActingUser, BatchAdmission, CandidateId, CategoryScores, EvaluatorRoster,
    HiringPipelineService, PointStatus, ScheduleDetails, SmarsEvaluation, Stage, SummaryPoint,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ResumeReportArgs {
    /// Scored-resume CSV export to rank
    #[arg(long)]
    pub(crate) resume_csv: PathBuf,
    /// Job title the batch applies to
    #[arg(long, default_value = "Backend Engineer")]
    pub(crate) job_title: String,
    /// Admission date stamped onto admitted candidates (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) admitted_on: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the demo date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Optional scored-resume CSV to admit instead of the built-in batch
    #[arg(long)]
    pub(crate) resume_csv: Option<PathBuf>,
}

pub(crate) fn run_resume_report(args: ResumeReportArgs) -> Result<(), AppError> {
    let ResumeReportArgs {
        resume_csv,
        job_title,
        admitted_on,
    } = args;

    let admitted_on = admitted_on.unwrap_or_else(|| Local::now().date_naive());
    let evaluations = ResumeBatchImporter::from_path(resume_csv)?;
    let admission = admit_locally(evaluations, &job_title, admitted_on);

    render_admission(&job_title, &admission);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, resume_csv } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Hireboard pipeline demo (evaluated {today})");

    let service = HiringPipelineService::new(
        Arc::new(InMemoryJobRepository::default()),
        EvaluatorRoster::standard(),
    );

    let job = match service.create_job("Backend Engineer", "Engineering", today) {
        Ok(job) => job,
        Err(err) => {
            println!("  Could not create the demo job: {err}");
            return Ok(());
        }
    };
    println!("- Created job {} ({})", job.id.0, job.title);

    let evaluations = match resume_csv {
        Some(path) => ResumeBatchImporter::from_path(path)?,
        None => builtin_batch(),
    };
    let admission = match service.admit_batch(&job.id, evaluations, today) {
        Ok(admission) => admission,
        Err(err) => {
            println!("  Batch admission failed: {err}");
            return Ok(());
        }
    };
    render_admission(&job.title, &admission);

    let Some(front_runner) = admission.admitted.first().cloned() else {
        println!("  Nothing admitted, demo ends here");
        return Ok(());
    };

    let recruiter = ActingUser {
        name: "Maya Tan".to_string(),
        role: "Recruiter".to_string(),
    };
    let schedule = match ScheduleDetails::parse(Some("2026-03-10"), Some("14:30"), "Google Meet") {
        Ok(schedule) => schedule,
        Err(err) => {
            println!("  Demo schedule invalid: {err}");
            return Ok(());
        }
    };

    println!("\nWalking {} through the pipeline", front_runner.name);
    if let Err(err) = service.schedule_interview(&job.id, &front_runner.id, &schedule, &recruiter) {
        println!("  Could not schedule the screening interview: {err}");
        return Ok(());
    }
    println!("- Screening interview confirmed on Google Meet");

    match service.record_mark(
        &job.id,
        &front_runner.id,
        Stage::Screening,
        "Lee Wei Song",
        Some(84),
        Some("Clear communicator, strong references".to_string()),
    ) {
        Ok(updated) => println!(
            "- Screening mark recorded, overall score now {}",
            updated.score
        ),
        Err(err) => println!("  Could not record the screening mark: {err}"),
    }

    if let Err(err) = service.add_note(
        &job.id,
        &front_runner.id,
        "Referred by the platform team",
        &recruiter,
        today.and_hms_opt(9, 30, 0).unwrap_or_default(),
    ) {
        println!("  Could not attach the note: {err}");
    } else {
        println!("- Private note attached by {}", recruiter.name);
    }

    if let Some(runner_up) = admission.admitted.get(1) {
        match service.reject_candidate(&job.id, &runner_up.id) {
            Ok(rejected) => println!(
                "- Rejected {} while at {}",
                rejected.name,
                rejected
                    .stage_at_rejection
                    .map(|stage| stage.label())
                    .unwrap_or("UNKNOWN")
            ),
            Err(err) => println!("  Could not reject the runner-up: {err}"),
        }
    }

    match service.board(&job.id) {
        Ok(board) => {
            println!("\nBoard for {}", job.id.0);
            for column in &board.columns {
                if column.partitioned {
                    println!(
                        "- {}: {} in progress, {} completed",
                        column.title,
                        column.in_progress.len(),
                        column.completed.len()
                    );
                } else {
                    println!("- {}: {} candidates", column.title, column.in_progress.len());
                }
            }
        }
        Err(err) => println!("  Board unavailable: {err}"),
    }

    match service.dashboard(today) {
        Ok(summary) => {
            println!("\nDashboard");
            println!(
                "- {} jobs ({} active) | {} candidates | {} hired",
                summary.total_jobs,
                summary.active_jobs,
                summary.total_candidates,
                summary.hired_candidates
            );
            for count in &summary.pipeline {
                println!("  - {}: {}", count.stage_label, count.count);
            }
            println!("- {} upcoming interviews", summary.upcoming_interviews.len());
        }
        Err(err) => println!("  Dashboard unavailable: {err}"),
    }

    render_legacy_record_normalization(today);

    Ok(())
}

/// Rank and cut a batch without going through a repository, for the
/// read-only report command.
fn admit_locally(
    evaluations: Vec<SmarsEvaluation>,
    job_title: &str,
    admitted_on: NaiveDate,
) -> BatchAdmission {
    let mut next = 0;
    ranker::admit_batch(evaluations, job_title, admitted_on, || {
        next += 1;
        CandidateId(format!("preview-{next:06}"))
    })
}

fn render_admission(job_title: &str, admission: &BatchAdmission) {
    println!("\nRanked review for {job_title} ({} scored resumes)", admission.ranked.len());
    for entry in &admission.ranked {
        println!(
            "- #{} {} | overall {:.1} | {:.0}th percentile | {}",
            entry.rank,
            entry.evaluation.name,
            entry.evaluation.overall_score,
            entry.percentile_of_batch,
            entry.band.label()
        );
    }
    println!("Admitted into the pipeline: {}", admission.admitted.len());
    for candidate in &admission.admitted {
        println!("- {} (score {})", candidate.name, candidate.score);
    }
}

fn render_legacy_record_normalization(today: NaiveDate) {
    println!("\nLegacy record normalization");
    let raw = r#"{
        "candidateName": "  Dewi  Lestari ",
        "position": "Data Engineer",
        "currentStage": "TECHNICAL_TEST",
        "score": 74,
        "emailAddress": "dewi@example.com"
    }"#;

    let record: RawCandidateRecord = match serde_json::from_str(raw) {
        Ok(record) => record,
        Err(err) => {
            println!("  Legacy payload unreadable: {err}");
            return;
        }
    };
    match record.normalize(CandidateId("cand-legacy".to_string()), today) {
        Ok(candidate) => println!(
            "- '{}' mapped to stage {} with score {}",
            candidate.name, candidate.stage, candidate.score
        ),
        Err(err) => println!("  Legacy record rejected: {err}"),
    }
}

fn builtin_batch() -> Vec<SmarsEvaluation> {
    let entries: [(&str, f32, f32, f32, f32, &str, PointStatus); 6] = [
        (
            "Sarah Miller",
            88.0,
            92.0,
            80.0,
            90.1,
            "Strong systems background",
            PointStatus::Positive,
        ),
        (
            "Noah Chen",
            75.0,
            81.0,
            70.0,
            75.4,
            "Open to relocation",
            PointStatus::Neutral,
        ),
        (
            "Ada Okafor",
            70.0,
            68.0,
            72.0,
            69.9,
            "No production Rust",
            PointStatus::Negative,
        ),
        (
            "Jonas Weber",
            66.0,
            60.0,
            71.0,
            65.2,
            "Solid fundamentals",
            PointStatus::Positive,
        ),
        (
            "Priya Raman",
            58.0,
            62.0,
            55.0,
            58.8,
            "Limited backend exposure",
            PointStatus::Negative,
        ),
        (
            "Dewi Lestari",
            52.0,
            48.0,
            60.0,
            53.3,
            "Early career",
            PointStatus::Neutral,
        ),
    ];

    entries
        .into_iter()
        .map(|(name, hr, tech, culture, overall, point, status)| SmarsEvaluation {
            name: name.to_string(),
            role: "Backend Engineer".to_string(),
            scores: CategoryScores { hr, tech, culture },
            overall_score: overall,
            points: vec![SummaryPoint {
                text: point.to_string(),
                status,
            }],
        })
        .collect()
}
