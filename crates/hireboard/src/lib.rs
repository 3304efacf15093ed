//! Applicant-tracking core for the hireboard service.
//!
//! The `pipeline` module owns the hiring state machine, the per-stage
//! evaluation ledger, score aggregation, batch percentile ranking, and the
//! kanban board projection. `intake` maps external records (scored resume
//! batches, legacy candidate exports) onto the domain model at the boundary.
//! Persistence stays behind the `pipeline::repository::JobRepository` trait
//! so the workflow logic can be exercised entirely in memory.

pub mod config;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod telemetry;
