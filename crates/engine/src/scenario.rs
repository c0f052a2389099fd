use std::fs;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tidepool_types::{PositionEconomics, PositionInput};

use crate::error::EngineError;

/// Scenario batch read from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// One named position snapshot to evaluate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub input: PositionInput,
}

/// Report produced by a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ScenarioResult>,
}

/// Outcome of a single scenario: either the computed economics or the
/// error that halted it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economics: Option<PositionEconomics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Load a scenario batch from a JSON file
pub fn load_scenarios(path: &str) -> Result<ScenarioFile, EngineError> {
    let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| EngineError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}
