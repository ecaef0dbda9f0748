use std::path::PathBuf;

use crate::error::{PipelineError, Result};
use crate::models::ExtractionProfile;

pub const DEFAULT_INPUT_DIR: &str = "./xml_files";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| PipelineError::Config("DATABASE_URL not set".into()))?;

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            max_connections,
        })
    }

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

/// Settings for one scan-worker run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub input_dir: PathBuf,
    pub profile: ExtractionProfile,
    /// Exit after the scan instead of waiting for a shutdown signal.
    pub once: bool,
}

impl ScanConfig {
    pub fn from_env() -> Result<Self> {
        let pipeline = PipelineConfig::from_env()?;

        let input_dir = std::env::var("CAMT_INPUT_DIR")
            .unwrap_or_else(|_| DEFAULT_INPUT_DIR.into())
            .into();

        let profile = match std::env::var("CAMT_PROFILE") {
            Ok(v) => v
                .parse()
                .map_err(|_| PipelineError::Config(format!("invalid CAMT_PROFILE: {v}")))?,
            Err(_) => ExtractionProfile::default(),
        };

        Ok(Self {
            database_url: pipeline.database_url,
            max_connections: pipeline.max_connections,
            input_dir,
            profile,
            once: false,
        })
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
        }
    }

    pub fn with_input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self
    }

    pub fn with_profile(mut self, profile: ExtractionProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}
