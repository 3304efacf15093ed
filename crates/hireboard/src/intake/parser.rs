use std::io::Read;

use serde::Deserialize;

use super::normalizer::normalize_name;
use super::ResumeBatchImportError;
use crate::pipeline::domain::{CategoryScores, PointStatus, SmarsEvaluation, SummaryPoint};

#[derive(Debug, Deserialize)]
struct ScoringRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Role", default)]
    role: String,
    #[serde(rename = "HR Score")]
    hr_score: String,
    #[serde(rename = "Tech Score")]
    tech_score: String,
    #[serde(rename = "Culture Score")]
    culture_score: String,
    #[serde(rename = "Overall Score")]
    overall_score: String,
    #[serde(rename = "Points", default)]
    points: String,
}

/// Rows without a name are skipped; a malformed score aborts the import.
pub(crate) fn parse_evaluations<R: Read>(
    reader: R,
) -> Result<Vec<SmarsEvaluation>, ResumeBatchImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut evaluations = Vec::new();

    for record in csv_reader.deserialize::<ScoringRow>() {
        let row = record?;
        let name = normalize_name(&row.name);
        if name.is_empty() {
            continue;
        }

        evaluations.push(SmarsEvaluation {
            name,
            role: normalize_name(&row.role),
            scores: CategoryScores {
                hr: parse_score(&row.hr_score)?,
                tech: parse_score(&row.tech_score)?,
                culture: parse_score(&row.culture_score)?,
            },
            overall_score: parse_score(&row.overall_score)?,
            points: parse_points(&row.points),
        });
    }

    Ok(evaluations)
}

fn parse_score(value: &str) -> Result<f32, ResumeBatchImportError> {
    let trimmed = value.trim();
    trimmed
        .parse::<f32>()
        .ok()
        .filter(|score| score.is_finite())
        .ok_or_else(|| ResumeBatchImportError::InvalidScore(trimmed.to_string()))
}

/// Points are `;`-separated bullets; a `+` prefix marks a positive one,
/// a `-` prefix a negative one, anything else is neutral.
fn parse_points(value: &str) -> Vec<SummaryPoint> {
    value
        .split(';')
        .map(str::trim)
        .filter(|bullet| !bullet.is_empty())
        .map(|bullet| {
            let (status, text) = if let Some(rest) = bullet.strip_prefix('+') {
                (PointStatus::Positive, rest)
            } else if let Some(rest) = bullet.strip_prefix('-') {
                (PointStatus::Negative, rest)
            } else {
                (PointStatus::Neutral, bullet)
            };
            SummaryPoint {
                text: text.trim().to_string(),
                status,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn parse_points_for_tests(value: &str) -> Vec<SummaryPoint> {
    parse_points(value)
}
