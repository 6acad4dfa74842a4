use super::AlternativeId;
use serde::{Deserialize, Serialize};

/// a wide-format column holding one alternative's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeColumn {
    pub alternative: AlternativeId,
    pub column: String,
}

/// an alternative-specific variable, e.g. `travel_time`, and the wide column
/// holding it for each alternative that defines it. alternatives that do not
/// appear here get an absent value in the long table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeVariable {
    pub name: String,
    pub columns: Vec<AlternativeColumn>,
}

/// describes how a wide survey table maps onto a long table.
///
/// [`super::Reshaper::try_new`] validates this against a table schema before
/// any rows are touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReshapeConfig {
    /// fields copied verbatim onto every long row of an observation
    pub individual_columns: Vec<String>,
    pub alternative_variables: Vec<AlternativeVariable>,
    #[serde(default)]
    pub availability_columns: Vec<AlternativeColumn>,
    /// integer observation id column, kept under the same name in long format
    pub observation_id_column: String,
    /// column holding the chosen alternative id. in long format this name
    /// holds the 0/1 chosen indicator.
    pub choice_column: String,
    #[serde(default = "ReshapeConfig::default_alternative_id_column")]
    pub alternative_id_column: String,
    #[serde(default = "ReshapeConfig::default_availability_column")]
    pub availability_column: String,
    /// emission order for alternatives. when unset, alternatives appear in
    /// ascending id order. when set, it must list exactly the alternatives
    /// named by the variable and availability mappings.
    #[serde(default)]
    pub alternative_order: Option<Vec<AlternativeId>>,
}

impl ReshapeConfig {
    pub const DEFAULT_ALTERNATIVE_ID_COLUMN: &'static str = "alt_id";
    pub const DEFAULT_AVAILABILITY_COLUMN: &'static str = "availability";

    fn default_alternative_id_column() -> String {
        String::from(Self::DEFAULT_ALTERNATIVE_ID_COLUMN)
    }

    fn default_availability_column() -> String {
        String::from(Self::DEFAULT_AVAILABILITY_COLUMN)
    }
}
