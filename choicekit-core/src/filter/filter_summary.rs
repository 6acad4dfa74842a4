use serde::{Deserialize, Serialize};

/// row counts before and after applying an [`super::ObservationFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub input_rows: usize,
    pub kept_rows: usize,
}

impl FilterSummary {
    pub fn dropped_rows(&self) -> usize {
        self.input_rows - self.kept_rows
    }

    /// true when nothing survived the filter. such a sample must not be
    /// passed on to estimation.
    pub fn is_empty(&self) -> bool {
        self.kept_rows == 0
    }
}

impl std::fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "kept {} of {} rows ({} dropped)",
            self.kept_rows,
            self.input_rows,
            self.dropped_rows()
        )
    }
}
