use super::{Value, WideTable};
use crate::ChoiceDataError;

/// appends a dense, 1-based observation id column to a (filtered) wide table.
///
/// ids depend only on row order. identifiers already present in the data are
/// ignored, so repeated responses from one individual become independent
/// observations.
pub fn assign_observation_ids(
    table: &WideTable,
    column: &str,
) -> Result<WideTable, ChoiceDataError> {
    let ids = (1..=table.len() as i64).map(Value::Integer).collect();
    let result = table.with_column(column, ids)?;
    log::debug!("assigned observation ids 1..={} to '{column}'", table.len());
    Ok(result)
}
