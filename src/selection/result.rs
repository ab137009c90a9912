use serde::{Deserialize, Serialize};

use crate::models::{Candidate, EngineKey, EngineSummary};

/// Outcome of best-of-N selection.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    /// Key of the winning engine.
    pub best_engine_key: EngineKey,
    /// Summary of the winning engine.
    pub summary: EngineSummary,
    /// Every candidate, best first.
    pub all_results: Vec<Candidate>,
}

impl SelectionResult {
    /// The winning candidate.
    pub fn best(&self) -> Option<&Candidate> {
        self.all_results.first()
    }

    /// Candidate for a given engine, if it ran.
    pub fn result_for(&self, key: EngineKey) -> Option<&Candidate> {
        self.all_results.iter().find(|c| c.key == key)
    }
}
