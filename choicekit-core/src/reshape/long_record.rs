use super::{AlternativeId, ColumnRef};
use crate::table::Value;

/// one (observation, alternative) row of a long-format table.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub observation_id: i64,
    pub alternative_id: AlternativeId,
    pub chosen: bool,
    /// individual fields, then alternative variables, then availability (if
    /// declared), then any derived columns. `None` marks a value the
    /// alternative does not define, which is distinct from zero.
    pub values: Vec<Option<Value>>,
}

impl LongRecord {
    pub fn get(&self, column: ColumnRef) -> Option<Value> {
        match column {
            ColumnRef::ObservationId => Some(Value::Integer(self.observation_id)),
            ColumnRef::AlternativeId => Some(Value::Integer(self.alternative_id.0)),
            ColumnRef::Chosen => Some(Value::Integer(i64::from(self.chosen))),
            ColumnRef::Value(index) => self.values.get(index).cloned().flatten(),
        }
    }
}
