use super::{AlternativeId, ColumnRef, LongRecord};
use crate::{table::Value, ChoiceDataError};
use itertools::Itertools;
use std::{
    collections::{BTreeMap, HashMap},
    io::Write,
};

/// a long-format choice table: one row per (observation, alternative) pair,
/// observations stored as contiguous blocks in alternative universe order.
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    observation_id_column: String,
    alternative_id_column: String,
    choice_column: String,
    availability_column: Option<String>,
    value_columns: Vec<String>,
    lookup: HashMap<String, usize>,
    alternatives: Vec<AlternativeId>,
    records: Vec<LongRecord>,
}

impl LongTable {
    pub(crate) fn new(
        observation_id_column: String,
        alternative_id_column: String,
        choice_column: String,
        availability_column: Option<String>,
        value_columns: Vec<String>,
        alternatives: Vec<AlternativeId>,
        records: Vec<LongRecord>,
    ) -> LongTable {
        let lookup = value_columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        LongTable {
            observation_id_column,
            alternative_id_column,
            choice_column,
            availability_column,
            value_columns,
            lookup,
            alternatives,
            records,
        }
    }

    pub fn records(&self) -> &[LongRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// the alternative universe, in emission order.
    pub fn alternatives(&self) -> &[AlternativeId] {
        &self.alternatives
    }

    pub fn n_observations(&self) -> usize {
        if self.alternatives.is_empty() {
            0
        } else {
            self.records.len() / self.alternatives.len()
        }
    }

    /// the block of rows belonging to each observation, in observation order.
    pub fn observations(&self) -> impl Iterator<Item = &[LongRecord]> {
        self.records.chunks(self.alternatives.len().max(1))
    }

    pub fn observation_id_column(&self) -> &str {
        &self.observation_id_column
    }

    pub fn alternative_id_column(&self) -> &str {
        &self.alternative_id_column
    }

    pub fn choice_column(&self) -> &str {
        &self.choice_column
    }

    pub fn availability_column(&self) -> Option<&str> {
        self.availability_column.as_deref()
    }

    /// full header of this table: identifier columns followed by value columns.
    pub fn column_names(&self) -> Vec<String> {
        [
            self.observation_id_column.clone(),
            self.alternative_id_column.clone(),
            self.choice_column.clone(),
        ]
        .into_iter()
        .chain(self.value_columns.iter().cloned())
        .collect_vec()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    pub fn resolve(&self, name: &str) -> Result<ColumnRef, ChoiceDataError> {
        if name == self.observation_id_column {
            Ok(ColumnRef::ObservationId)
        } else if name == self.alternative_id_column {
            Ok(ColumnRef::AlternativeId)
        } else if name == self.choice_column {
            Ok(ColumnRef::Chosen)
        } else {
            self.lookup
                .get(name)
                .map(|i| ColumnRef::Value(*i))
                .ok_or_else(|| ChoiceDataError::MissingColumn(name.to_string()))
        }
    }

    /// value of a named column on some row. `Ok(None)` means the value is absent.
    pub fn get(&self, row: usize, column: &str) -> Result<Option<Value>, ChoiceDataError> {
        let column_ref = self.resolve(column)?;
        Ok(self.records.get(row).and_then(|r| r.get(column_ref)))
    }

    /// appends a computed column. this is the only mutation a long table allows.
    pub(crate) fn add_column(
        &mut self,
        name: &str,
        values: Vec<Option<Value>>,
    ) -> Result<(), ChoiceDataError> {
        if self.has_column(name) {
            return Err(ChoiceDataError::DuplicateColumn(name.to_string()));
        }
        if values.len() != self.records.len() {
            return Err(ChoiceDataError::InvalidConfiguration(format!(
                "column '{name}' has {} values for a table with {} rows",
                values.len(),
                self.records.len()
            )));
        }
        for (record, value) in self.records.iter_mut().zip(values) {
            record.values.push(value);
        }
        self.lookup.insert(name.to_string(), self.value_columns.len());
        self.value_columns.push(name.to_string());
        Ok(())
    }

    /// number of observations choosing each alternative.
    pub fn chosen_counts(&self) -> BTreeMap<AlternativeId, usize> {
        let mut counts = self
            .alternatives
            .iter()
            .map(|a| (*a, 0))
            .collect::<BTreeMap<_, _>>();
        for record in self.records.iter().filter(|r| r.chosen) {
            *counts.entry(record.alternative_id).or_default() += 1;
        }
        counts
    }

    /// number of observations where each alternative is available. alternatives
    /// without an availability mapping count as unavailable.
    pub fn available_counts(&self) -> BTreeMap<AlternativeId, usize> {
        let mut counts = self
            .alternatives
            .iter()
            .map(|a| (*a, 0))
            .collect::<BTreeMap<_, _>>();
        let availability = match self.availability_column.as_deref() {
            Some(name) => self.resolve(name).ok(),
            None => None,
        };
        if let Some(column) = availability {
            for record in self.records.iter() {
                let available = record
                    .get(column)
                    .and_then(|v| v.as_f64())
                    .map(|v| v != 0.0)
                    .unwrap_or_default();
                if available {
                    *counts.entry(record.alternative_id).or_default() += 1;
                }
            }
        }
        counts
    }

    /// writes this table as CSV with a header row. absent values become empty
    /// fields and the chosen indicator is written as 0/1.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ChoiceDataError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer
            .write_record(self.column_names())
            .map_err(|e| ChoiceDataError::WriteError(format!("header: {e}")))?;
        for (idx, record) in self.records.iter().enumerate() {
            let row = [
                record.observation_id.to_string(),
                record.alternative_id.to_string(),
                u8::from(record.chosen).to_string(),
            ]
            .into_iter()
            .chain(record.values.iter().map(|v| match v {
                Some(value) => value.to_string(),
                None => String::new(),
            }))
            .collect_vec();
            csv_writer
                .write_record(&row)
                .map_err(|e| ChoiceDataError::WriteError(format!("row {idx}: {e}")))?;
        }
        csv_writer
            .flush()
            .map_err(|e| ChoiceDataError::WriteError(e.to_string()))
    }
}
