use crate::{
    reshape::{ColumnRef, LongRecord, LongTable},
    ChoiceDataError,
};
use serde::{Deserialize, Serialize};

/// membership test on one column of a long-format row. absent and non-numeric
/// values never match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowPredicate {
    pub column: String,
    pub one_of: Vec<f64>,
}

/// a [`RowPredicate`] with its column resolved against a table.
pub(crate) struct ResolvedPredicate<'a> {
    column: ColumnRef,
    one_of: &'a [f64],
}

impl RowPredicate {
    pub(crate) fn resolve(&self, table: &LongTable) -> Result<ResolvedPredicate<'_>, ChoiceDataError> {
        Ok(ResolvedPredicate {
            column: table.resolve(&self.column)?,
            one_of: &self.one_of,
        })
    }
}

impl ResolvedPredicate<'_> {
    pub(crate) fn test(&self, record: &LongRecord) -> bool {
        record
            .get(self.column)
            .and_then(|v| v.as_f64())
            .map(|v| self.one_of.contains(&v))
            .unwrap_or_default()
    }
}
