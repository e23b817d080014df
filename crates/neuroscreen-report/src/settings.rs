//! Engine configuration.

use neuroscreen_clinical::InterpretationTables;
use neuroscreen_core::{Error, Result};
use neuroscreen_record::{AgeCalculator, AgeConfig, NormalizerConfig};
use neuroscreen_signal::{SensorChannel, SpectrumConfig};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `NEUROSCREEN_SPECTRUM__MAX_SAMPLES`
pub const ENV_PREFIX: &str = "NEUROSCREEN";

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frequency estimation
    pub spectrum: SpectrumConfig,

    /// Sensor triple read from motor recordings
    pub channel: SensorChannel,

    /// Test allow-list and timestamp fields
    pub normalizer: NormalizerConfig,

    /// Birth-date interpretation
    pub age: AgeConfig,

    /// Severity band tables
    pub interpretation: InterpretationTables,
}

impl EngineConfig {
    /// Load configuration from file, with environment overrides on top
    pub fn from_file(path: &str) -> Result<Self> {
        Self::load(Some(path), environment())
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(None, environment())
    }

    pub fn validate(&self) -> Result<()> {
        self.spectrum.validate()?;
        self.interpretation.validate()?;
        AgeCalculator::new(self.age)?;
        Ok(())
    }

    fn load(path: Option<&str>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder.add_source(env).build().map_err(config_error)?;
        let config: Self = settings.try_deserialize().map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn config_error(e: config::ConfigError) -> Error {
    Error::Config(e.to_string())
}
