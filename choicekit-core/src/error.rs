#[derive(thiserror::Error, Debug)]
pub enum ChoiceDataError {
    #[error("failed reading '{filepath}': {source}")]
    ReadError {
        filepath: String,
        source: csv::Error,
    },
    #[error("failed parsing wide table row {row}: {source}")]
    CsvRowError { row: usize, source: csv::Error },
    #[error("column '{0}' not found in table schema")]
    MissingColumn(String),
    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),
    #[error("row {row} has {found} values but the schema has {expected} columns")]
    RowWidthError {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("observation {observation_id} has choice value '{value}' outside of the alternative universe [{universe}]")]
    ChoiceOutsideUniverse {
        observation_id: String,
        value: String,
        universe: String,
    },
    #[error("observation id column '{column}' has non-integer value '{value}' at row {row}")]
    InvalidObservationId {
        column: String,
        value: String,
        row: usize,
    },
    #[error("column '{column}' has non-numeric value '{value}' for observation {observation_id}, alternative {alternative_id}")]
    NonNumericValue {
        column: String,
        value: String,
        observation_id: i64,
        alternative_id: String,
    },
    #[error("filter kept 0 of {0} rows, no observations remain for estimation")]
    EmptySample(usize),
    #[error("invalid model specification: {0}")]
    InvalidSpecification(String),
    #[error("estimation failed: {0}")]
    EstimationError(String),
    #[error("failed writing long table: {0}")]
    WriteError(String),
}
