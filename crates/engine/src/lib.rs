pub mod config;
pub mod error;
pub mod scenario;

pub use config::{EngineConfig, OutputConfig, RunConfig};
pub use error::EngineError;
pub use scenario::{load_scenarios, Scenario, ScenarioFile, ScenarioReport, ScenarioResult};
