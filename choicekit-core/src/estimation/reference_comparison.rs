use super::EstimationResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCoefficient {
    pub name: String,
    pub estimate: f64,
    #[serde(default)]
    pub std_err: Option<f64>,
}

/// published output of a model, used to check a fit reproduces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceResults {
    pub coefficients: Vec<ReferenceCoefficient>,
    #[serde(default)]
    pub log_likelihood: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub name: String,
    pub fitted: f64,
    pub reference: f64,
    pub difference: f64,
    pub within_tolerance: bool,
}

impl ComparisonRow {
    fn new(name: &str, fitted: f64, reference: f64, tolerance: f64) -> ComparisonRow {
        let difference = (fitted - reference).abs();
        ComparisonRow {
            name: name.to_string(),
            fitted,
            reference,
            difference,
            within_tolerance: difference <= tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub tolerance: f64,
    pub rows: Vec<ComparisonRow>,
    /// reference coefficients the fit did not produce
    pub missing: Vec<String>,
}

impl ComparisonReport {
    /// compares estimates, standard errors (where the reference has them) and
    /// the final log-likelihood, using an absolute tolerance.
    pub fn new(
        result: &EstimationResult,
        reference: &ReferenceResults,
        tolerance: f64,
    ) -> ComparisonReport {
        let mut rows = vec![];
        let mut missing = vec![];
        for expected in reference.coefficients.iter() {
            match result.coefficient(&expected.name) {
                None => missing.push(expected.name.clone()),
                Some(fitted) => {
                    rows.push(ComparisonRow::new(
                        &expected.name,
                        fitted.estimate,
                        expected.estimate,
                        tolerance,
                    ));
                    if let Some(std_err) = expected.std_err {
                        let name = format!("{} (std_err)", expected.name);
                        rows.push(ComparisonRow::new(&name, fitted.std_err, std_err, tolerance));
                    }
                }
            }
        }
        if let Some(ll) = reference.log_likelihood {
            rows.push(ComparisonRow::new(
                "log-likelihood",
                result.log_likelihood,
                ll,
                tolerance,
            ));
        }
        ComparisonReport {
            tolerance,
            rows,
            missing,
        }
    }

    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.rows.iter().all(|r| r.within_tolerance)
    }
}

impl std::fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or_default()
            .max("coefficient".len());
        writeln!(
            f,
            "{:<width$}  {:>12}  {:>12}  {:>10}  ok",
            "coefficient", "fitted", "reference", "diff"
        )?;
        for r in self.rows.iter() {
            writeln!(
                f,
                "{:<width$}  {:>12.4}  {:>12.4}  {:>10.2e}  {}",
                r.name,
                r.fitted,
                r.reference,
                r.difference,
                if r.within_tolerance { "yes" } else { "NO" }
            )?;
        }
        for name in self.missing.iter() {
            writeln!(f, "{name:<width$}  missing from fitted results")?;
        }
        let verdict = if self.is_match() {
            "matches"
        } else {
            "does not match"
        };
        write!(f, "fit {verdict} the reference at tolerance {}", self.tolerance)
    }
}
