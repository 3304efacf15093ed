use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, Stage};

/// A named person whose mark is required before a stage counts as complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluator {
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Evaluator {
    pub fn new(name: &str, role: &str) -> Self {
        Self {
            name: name.to_string(),
            role: role.to_string(),
            avatar_url: None,
        }
    }
}

/// Lookup table from stage to its required evaluators.
///
/// Pure data so deployments can swap in per-job rosters without touching the
/// transition logic. The final interview additionally pulls in the scheduled
/// interviewer from the candidate record, which is why resolution takes the
/// candidate as input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorRoster {
    assignments: BTreeMap<Stage, Vec<Evaluator>>,
}

impl EvaluatorRoster {
    pub fn new(assignments: BTreeMap<Stage, Vec<Evaluator>>) -> Self {
        Self { assignments }
    }

    /// The production roster: the automated OMOED stage has no evaluators,
    /// screening is HR only, the technical test adds a technical evaluator,
    /// and the final interview starts from HR.
    pub fn standard() -> Self {
        let mut assignments = BTreeMap::new();
        assignments.insert(Stage::Omoed, Vec::new());
        assignments.insert(Stage::Screening, vec![Evaluator::new("Lee Wei Song", "HR")]);
        assignments.insert(
            Stage::TechnicalTest,
            vec![
                Evaluator::new("Andrew Sebastian", "HR"),
                Evaluator::new("John Doe (CTO)", "Technical Evaluator"),
            ],
        );
        assignments.insert(
            Stage::FinalInterview,
            vec![Evaluator::new("Lee Wei Song", "HR")],
        );
        Self { assignments }
    }

    /// The ordered evaluator list for one stage of one candidate's pipeline.
    ///
    /// For the final interview the first scheduled participant joins the
    /// configured list, unless they are already on it. Unknown and terminal
    /// stages resolve to an empty list.
    pub fn evaluators_for(&self, stage: Stage, candidate: &Candidate) -> Vec<Evaluator> {
        let mut evaluators = self
            .assignments
            .get(&stage)
            .cloned()
            .unwrap_or_default();

        if stage == Stage::FinalInterview {
            let interviewer = candidate
                .upcoming_schedule
                .as_ref()
                .and_then(|schedule| schedule.participants.first());
            if let Some(interviewer) = interviewer {
                let already_listed = evaluators
                    .iter()
                    .any(|evaluator| evaluator.name == interviewer.name);
                if !already_listed {
                    evaluators.push(Evaluator {
                        name: interviewer.name.clone(),
                        role: interviewer.role.clone(),
                        avatar_url: interviewer.avatar_url.clone(),
                    });
                }
            }
        }

        evaluators
    }
}

impl Default for EvaluatorRoster {
    fn default() -> Self {
        Self::standard()
    }
}
