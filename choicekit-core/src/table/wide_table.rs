use super::Value;
use crate::ChoiceDataError;
use kdam::{Bar, BarExt};
use std::{collections::HashMap, io::Read, path::Path};

/// a survey table in wide format: one row per decision event, with
/// alternative-specific attributes spread across columns.
///
/// rows are immutable once loaded. stages that transform the table
/// ([`crate::filter::ObservationFilter`], [`super::assign_observation_ids`])
/// produce new tables.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    columns: Vec<String>,
    lookup: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl WideTable {
    /// builds a table, checking that column names are unique and every row
    /// matches the schema width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<WideTable, ChoiceDataError> {
        let lookup = build_lookup(&columns)?;
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(ChoiceDataError::RowWidthError {
                row,
                expected: columns.len(),
                found: values.len(),
            });
        }
        Ok(WideTable {
            columns,
            lookup,
            rows,
        })
    }

    /// reads a delimited table with a header row.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<WideTable, ChoiceDataError> {
        let csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);
        read_table(csv_reader, None)
    }

    /// reads a delimited file with a header row, optionally reporting progress on stderr.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        delimiter: u8,
        progress: bool,
    ) -> Result<WideTable, ChoiceDataError> {
        let filepath = path.as_ref().to_string_lossy().to_string();
        let csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_path(path.as_ref())
            .map_err(|source| ChoiceDataError::ReadError {
                filepath: filepath.clone(),
                source,
            })?;
        let bar = if progress {
            let bar = Bar::builder()
                .desc(format!("read {filepath}"))
                .build()
                .map_err(|e| ChoiceDataError::InvalidConfiguration(format!("progress bar: {e}")))?;
            Some(bar)
        } else {
            None
        };
        let table = read_table(csv_reader, bar)?;
        log::info!(
            "read {} rows with {} columns from '{filepath}'",
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// position of a column in the schema, failing with a schema error if absent.
    pub fn column_index(&self, name: &str) -> Result<usize, ChoiceDataError> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| ChoiceDataError::MissingColumn(name.to_string()))
    }

    /// value of a named column on some row.
    pub fn value(&self, row: usize, column: &str) -> Result<Option<&Value>, ChoiceDataError> {
        let index = self.column_index(column)?;
        Ok(self.rows.get(row).and_then(|r| r.get(index)))
    }

    /// a table with this schema holding a different set of rows.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<Value>>) -> WideTable {
        WideTable {
            columns: self.columns.clone(),
            lookup: self.lookup.clone(),
            rows,
        }
    }

    /// a copy of this table with one more column appended on the right.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<WideTable, ChoiceDataError> {
        if self.has_column(name) {
            return Err(ChoiceDataError::DuplicateColumn(name.to_string()));
        }
        if values.len() != self.rows.len() {
            return Err(ChoiceDataError::InvalidConfiguration(format!(
                "column '{name}' has {} values for a table with {} rows",
                values.len(),
                self.rows.len()
            )));
        }
        let mut columns = self.columns.clone();
        columns.push(name.to_string());
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut extended = row.clone();
                extended.push(value);
                extended
            })
            .collect();
        WideTable::new(columns, rows)
    }
}

fn build_lookup(columns: &[String]) -> Result<HashMap<String, usize>, ChoiceDataError> {
    let mut lookup = HashMap::with_capacity(columns.len());
    for (index, name) in columns.iter().enumerate() {
        if lookup.insert(name.clone(), index).is_some() {
            return Err(ChoiceDataError::DuplicateColumn(name.clone()));
        }
    }
    Ok(lookup)
}

fn read_table<R: Read>(
    mut reader: csv::Reader<R>,
    mut bar: Option<Bar>,
) -> Result<WideTable, ChoiceDataError> {
    let columns = reader
        .headers()
        .map_err(|source| ChoiceDataError::CsvRowError { row: 0, source })?
        .iter()
        .map(String::from)
        .collect::<Vec<_>>();
    let mut rows = vec![];
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| ChoiceDataError::CsvRowError { row: idx, source })?;
        rows.push(record.iter().map(Value::parse).collect::<Vec<_>>());
        if let Some(b) = bar.as_mut() {
            let _ = b.update(1);
        }
    }
    if bar.is_some() {
        eprintln!();
    }
    WideTable::new(columns, rows)
}
