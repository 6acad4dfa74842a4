use super::FilterSummary;
use crate::{table::Value, ChoiceDataError, WideTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// selects the decision events used for estimation.
///
/// a row is dropped if its category is not in `allowed_categories`, OR its
/// choice equals the `unknown_choice` sentinel. the sentinel is dataset-specific
/// (Swissmetro codes an unknown choice as 0), and when unset no row is dropped
/// on account of its choice value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationFilter {
    /// column holding the trip purpose or other category code
    pub category_column: String,
    /// category codes to keep. must not be empty.
    pub allowed_categories: BTreeSet<i64>,
    /// column holding the chosen alternative id
    pub choice_column: String,
    /// choice value signalling that no choice is known
    #[serde(default)]
    pub unknown_choice: Option<i64>,
}

impl ObservationFilter {
    /// produces a filtered copy of the table, preserving row order. the input
    /// table is not modified.
    pub fn apply(&self, table: &WideTable) -> Result<(WideTable, FilterSummary), ChoiceDataError> {
        if self.allowed_categories.is_empty() {
            return Err(ChoiceDataError::InvalidConfiguration(format!(
                "filter on '{}' has no allowed categories",
                self.category_column
            )));
        }
        let category_idx = table.column_index(&self.category_column)?;
        let choice_idx = table.column_index(&self.choice_column)?;

        let kept = table
            .rows()
            .iter()
            .filter(|row| self.accepts(&row[category_idx], &row[choice_idx]))
            .cloned()
            .collect::<Vec<_>>();

        let summary = FilterSummary {
            input_rows: table.len(),
            kept_rows: kept.len(),
        };
        log::info!(
            "filter {} in {:?}, {} != {:?}: {summary}",
            self.category_column,
            self.allowed_categories,
            self.choice_column,
            self.unknown_choice
        );
        Ok((table.with_rows(kept), summary))
    }

    fn accepts(&self, category: &Value, choice: &Value) -> bool {
        let allowed_category = category
            .as_integer()
            .map(|c| self.allowed_categories.contains(&c))
            .unwrap_or_default();
        let unknown_choice = match self.unknown_choice {
            Some(sentinel) => choice.as_integer() == Some(sentinel),
            None => false,
        };
        allowed_category && !unknown_choice
    }
}

#[cfg(test)]
mod tests {
    use super::ObservationFilter;
    use crate::{ChoiceDataError, WideTable};

    fn filter(unknown_choice: Option<i64>) -> ObservationFilter {
        ObservationFilter {
            category_column: String::from("PURPOSE"),
            allowed_categories: [1, 3].into_iter().collect(),
            choice_column: String::from("CHOICE"),
            unknown_choice,
        }
    }

    fn table() -> WideTable {
        let data = "ROW,PURPOSE,CHOICE\n\
                    a,1,2\n\
                    b,2,1\n\
                    c,3,0\n\
                    d,3,3\n\
                    e,4,0\n\
                    f,1,1\n";
        WideTable::from_reader(data.as_bytes(), b',').unwrap()
    }

    fn row_names(table: &WideTable) -> Vec<String> {
        (0..table.len())
            .map(|i| table.value(i, "ROW").unwrap().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_either_condition_drops_row() {
        let source = table();
        let (filtered, summary) = filter(Some(0)).apply(&source).unwrap();
        assert_eq!(row_names(&filtered), vec!["a", "d", "f"]);
        assert_eq!(summary.input_rows, 6);
        assert_eq!(summary.kept_rows, 3);
        assert_eq!(summary.dropped_rows(), 3);
        // input is untouched
        assert_eq!(source.len(), 6);
    }

    #[test]
    fn test_no_sentinel_keeps_unknown_choices() {
        let (filtered, _) = filter(None).apply(&table()).unwrap();
        assert_eq!(row_names(&filtered), vec!["a", "c", "d", "f"]);
    }

    #[test]
    fn test_filter_removing_everything_reports_empty() {
        let mut f = filter(Some(0));
        f.allowed_categories = [9].into_iter().collect();
        let (filtered, summary) = f.apply(&table()).unwrap();
        assert!(filtered.is_empty());
        assert!(summary.is_empty());
    }

    #[test]
    fn test_missing_column_fails() {
        let mut f = filter(Some(0));
        f.category_column = String::from("TRIP_PURPOSE");
        assert!(matches!(
            f.apply(&table()),
            Err(ChoiceDataError::MissingColumn(c)) if c == "TRIP_PURPOSE"
        ));
    }

    #[test]
    fn test_empty_allowed_set_is_configuration_error() {
        let mut f = filter(Some(0));
        f.allowed_categories.clear();
        assert!(matches!(
            f.apply(&table()),
            Err(ChoiceDataError::InvalidConfiguration(_))
        ));
    }
}
