use super::InputConfig;
use crate::app::AppError;
use choicekit_core::{
    derived::DerivedVariable, estimation::ModelSpecification, filter::ObservationFilter,
    reshape::ReshapeConfig,
};
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// everything needed to go from a wide survey file to a validated long
/// table and model specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: InputConfig,
    pub filter: ObservationFilter,
    pub reshape: ReshapeConfig,
    #[serde(default)]
    pub derived: Vec<DerivedVariable>,
    pub model: ModelSpecification,
}

impl PipelineConfig {
    const SWISSMETRO: &'static str = include_str!("swissmetro.toml");

    /// the Swissmetro multinomial logit example configuration.
    pub fn swissmetro() -> Result<PipelineConfig, AppError> {
        let source = config::File::from_str(Self::SWISSMETRO, FileFormat::Toml);
        Self::build(source, "swissmetro.toml")
    }

    /// reads a TOML or JSON configuration file, picking the format by extension.
    pub fn from_file(filepath: &str) -> Result<PipelineConfig, AppError> {
        let format = match Path::new(filepath).extension().and_then(|e| e.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => {
                return Err(AppError::ConfigurationError(format!(
                    "unsupported configuration file type: {filepath}"
                )))
            }
        };
        log::info!("reading pipeline configuration from {filepath}");
        Self::build(config::File::new(filepath, format), filepath)
    }

    fn build<S>(source: S, name: &str) -> Result<PipelineConfig, AppError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| AppError::ConfigReadError {
                msg: format!("failed reading '{name}'"),
                source: e,
            })?;
        config
            .try_deserialize::<PipelineConfig>()
            .map_err(|e| AppError::ConfigReadError {
                msg: format!("failed decoding '{name}' as a pipeline configuration"),
                source: e,
            })
    }
}
