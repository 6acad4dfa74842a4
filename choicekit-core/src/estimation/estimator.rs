use super::{EstimationResult, ModelSpecification};
use crate::{reshape::LongTable, ChoiceDataError};
use serde::{Deserialize, Serialize};

/// long-format column names an estimation backend needs to interpret a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongColumnNames {
    pub alternative_id: String,
    pub observation_id: String,
    pub choice: String,
}

impl From<&LongTable> for LongColumnNames {
    fn from(table: &LongTable) -> Self {
        LongColumnNames {
            alternative_id: table.alternative_id_column().to_string(),
            observation_id: table.observation_id_column().to_string(),
            choice: table.choice_column().to_string(),
        }
    }
}

/// a multinomial logit estimation backend.
///
/// maximum likelihood estimation lives outside this crate. implementations
/// treat the table and specification as read-only inputs and return fitted
/// coefficients with no side effects on the caller.
pub trait ChoiceModelEstimator {
    fn fit(
        &self,
        table: &LongTable,
        specification: &ModelSpecification,
        columns: &LongColumnNames,
    ) -> Result<EstimationResult, ChoiceDataError>;
}
