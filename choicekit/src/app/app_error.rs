use choicekit_core::ChoiceDataError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("invalid run configuration: {0}")]
    ConfigurationError(String),
    #[error(transparent)]
    ChoiceDataError(#[from] ChoiceDataError),
    #[error("failed reading '{filepath}': {error}")]
    ReadError { filepath: String, error: String },
    #[error("failure decoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("fitted results do not match the reference within tolerance {0}")]
    ReferenceMismatch(f64),
}
