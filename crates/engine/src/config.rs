use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Engine configuration loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Report output options
    #[serde(default)]
    pub output: OutputConfig,

    /// Batch run behavior
    #[serde(default)]
    pub run: RunConfig,
}

/// Where and how the report is written
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Pretty-print the JSON report
    #[serde(default)]
    pub pretty: bool,

    /// Write the report to this path instead of stdout
    #[serde(default)]
    pub path: Option<String>,
}

/// Batch run behavior
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunConfig {
    /// Abort the batch on the first scenario that fails instead of
    /// reporting the failure and continuing
    #[serde(default)]
    pub halt_on_error: bool,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_string(),
            source,
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|e| EngineError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &str) -> Result<(), EngineError> {
        let content = toml::to_string_pretty(self).map_err(|e| EngineError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        fs::write(path, content).map_err(|source| EngineError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some(path) = &self.output.path {
            if path.is_empty() {
                return Err(EngineError::InvalidConfig(
                    "output.path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(!config.output.pretty);
        assert!(config.output.path.is_none());
        assert!(!config.run.halt_on_error);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: EngineConfig = toml::from_str(
            r#"
            [output]
            pretty = true
            "#,
        )
        .unwrap();
        assert!(config.output.pretty);
        assert!(!config.run.halt_on_error);
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let config: EngineConfig = toml::from_str(
            r#"
            [output]
            path = ""
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
