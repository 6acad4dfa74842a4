use super::PreparedSample;
use choicekit_core::reshape::AlternativeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// printable description of a prepared sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSummary {
    pub input_rows: usize,
    pub observations: usize,
    pub long_rows: usize,
    pub alternatives: Vec<AlternativeId>,
    pub chosen: BTreeMap<AlternativeId, usize>,
    pub available: BTreeMap<AlternativeId, usize>,
    pub columns: Vec<String>,
}

impl From<&PreparedSample> for SampleSummary {
    fn from(sample: &PreparedSample) -> Self {
        let table = &sample.long_table;
        SampleSummary {
            input_rows: sample.filter_summary.input_rows,
            observations: table.n_observations(),
            long_rows: table.len(),
            alternatives: table.alternatives().to_vec(),
            chosen: table.chosen_counts(),
            available: table.available_counts(),
            columns: table.column_names(),
        }
    }
}

impl std::fmt::Display for SampleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "observations: {} (of {} input rows)",
            self.observations, self.input_rows
        )?;
        writeln!(f, "long rows: {}", self.long_rows)?;
        writeln!(f, "columns: {}", self.columns.join(", "))?;
        writeln!(f, "{:>11}  {:>8}  {:>8}  {:>9}", "alternative", "chosen", "share", "available")?;
        for alternative in self.alternatives.iter() {
            let chosen = self.chosen.get(alternative).copied().unwrap_or_default();
            let available = self.available.get(alternative).copied().unwrap_or_default();
            let share = if self.observations == 0 {
                0.0
            } else {
                chosen as f64 / self.observations as f64
            };
            writeln!(
                f,
                "{:>11}  {:>8}  {:>8.3}  {:>9}",
                alternative, chosen, share, available
            )?;
        }
        Ok(())
    }
}
