//! Intake of externally produced candidate data: scored-resume CSV exports
//! and legacy candidate records with aliased fields.

mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use crate::pipeline::domain::SmarsEvaluation;

pub use normalizer::{NormalizeError, RawCandidateRecord};

#[derive(Debug)]
pub enum ResumeBatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidScore(String),
}

impl std::fmt::Display for ResumeBatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResumeBatchImportError::Io(err) => {
                write!(f, "failed to read resume scoring export: {}", err)
            }
            ResumeBatchImportError::Csv(err) => write!(f, "invalid scoring CSV data: {}", err),
            ResumeBatchImportError::InvalidScore(value) => {
                write!(f, "invalid score value '{}'", value)
            }
        }
    }
}

impl std::error::Error for ResumeBatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResumeBatchImportError::Io(err) => Some(err),
            ResumeBatchImportError::Csv(err) => Some(err),
            ResumeBatchImportError::InvalidScore(_) => None,
        }
    }
}

impl From<std::io::Error> for ResumeBatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ResumeBatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads the CSV a resume-scoring run exports
/// (`Name,Role,HR Score,Tech Score,Culture Score,Overall Score,Points`)
/// into evaluations ready for batch ranking and admission.
pub struct ResumeBatchImporter;

impl ResumeBatchImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<SmarsEvaluation>, ResumeBatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SmarsEvaluation>, ResumeBatchImportError> {
        parser::parse_evaluations(reader)
    }
}
