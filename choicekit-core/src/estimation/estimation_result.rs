use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_err: f64,
}

impl Coefficient {
    pub fn t_stat(&self) -> f64 {
        self.estimate / self.std_err
    }
}

/// fitted statistics returned by a [`super::ChoiceModelEstimator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub coefficients: Vec<Coefficient>,
    pub log_likelihood: f64,
    #[serde(default)]
    pub null_log_likelihood: Option<f64>,
    #[serde(default)]
    pub n_observations: usize,
}

impl EstimationResult {
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }

    /// McFadden's pseudo r-squared, when the null log-likelihood is known.
    pub fn rho_squared(&self) -> Option<f64> {
        self.null_log_likelihood
            .map(|null| 1.0 - self.log_likelihood / null)
    }
}

impl std::fmt::Display for EstimationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .coefficients
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or_default()
            .max("coefficient".len());
        writeln!(f, "number of observations: {}", self.n_observations)?;
        writeln!(f, "log-likelihood at convergence: {:.4}", self.log_likelihood)?;
        if let Some(null) = self.null_log_likelihood {
            writeln!(f, "null log-likelihood: {null:.4}")?;
        }
        if let Some(rho) = self.rho_squared() {
            writeln!(f, "rho-squared: {rho:.4}")?;
        }
        writeln!(
            f,
            "{:<width$}  {:>10}  {:>10}  {:>8}",
            "coefficient", "estimate", "std_err", "t"
        )?;
        for c in self.coefficients.iter() {
            writeln!(
                f,
                "{:<width$}  {:>10.4}  {:>10.4}  {:>8.3}",
                c.name,
                c.estimate,
                c.std_err,
                c.t_stat()
            )?;
        }
        Ok(())
    }
}
