use crate::app::AppError;
use choicekit_core::{
    estimation::{
        ChoiceModelEstimator, EstimationResult, LongColumnNames, ModelSpecification,
        ReferenceResults,
    },
    ChoiceDataError, LongTable,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// a [`ChoiceModelEstimator`] backed by coefficients an external tool already
/// fitted, stored as JSON in the [`EstimationResult`] layout.
///
/// coefficients are returned in specification order. the observation count
/// always comes from the table being "fitted".
pub struct ResultsFileEstimator {
    path: PathBuf,
}

impl ResultsFileEstimator {
    pub fn new<P: AsRef<Path>>(path: P) -> ResultsFileEstimator {
        ResultsFileEstimator {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ChoiceModelEstimator for ResultsFileEstimator {
    fn fit(
        &self,
        table: &LongTable,
        specification: &ModelSpecification,
        columns: &LongColumnNames,
    ) -> Result<EstimationResult, ChoiceDataError> {
        let stored: EstimationResult = read_json(&self.path)
            .map_err(|e| ChoiceDataError::EstimationError(e.to_string()))?;
        log::debug!(
            "loaded {} fitted coefficients for alternatives '{}', observations '{}', choice '{}'",
            stored.coefficients.len(),
            columns.alternative_id,
            columns.observation_id,
            columns.choice
        );

        let mut missing = vec![];
        let mut coefficients = vec![];
        for name in specification.coefficient_names() {
            match stored.coefficient(&name) {
                Some(c) => coefficients.push(c.clone()),
                None => missing.push(name),
            }
        }
        if !missing.is_empty() {
            return Err(ChoiceDataError::EstimationError(format!(
                "'{}' has no fitted value for: {}",
                self.path.to_string_lossy(),
                missing.join("; ")
            )));
        }
        if stored.n_observations != 0 && stored.n_observations != table.n_observations() {
            log::warn!(
                "'{}' was fitted on {} observations but the prepared sample has {}",
                self.path.to_string_lossy(),
                stored.n_observations,
                table.n_observations()
            );
        }

        Ok(EstimationResult {
            coefficients,
            log_likelihood: stored.log_likelihood,
            null_log_likelihood: stored.null_log_likelihood,
            n_observations: table.n_observations(),
        })
    }
}

/// reads published reference results from a JSON file.
pub fn read_reference<P: AsRef<Path>>(path: P) -> Result<ReferenceResults, AppError> {
    read_json(path.as_ref())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let filepath = path.to_string_lossy().to_string();
    let contents = std::fs::read_to_string(path).map_err(|e| AppError::ReadError {
        filepath: filepath.clone(),
        error: e.to_string(),
    })?;
    let decoded = serde_json::from_str(&contents)?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::ResultsFileEstimator;
    use crate::{config::PipelineConfig, pipeline::prepare};
    use choicekit_core::{
        estimation::{ChoiceModelEstimator, LongColumnNames},
        ChoiceDataError,
    };
    use std::{io::Write, path::PathBuf};

    fn sample() -> (PipelineConfig, choicekit_core::LongTable) {
        let mut conf = PipelineConfig::swissmetro().unwrap();
        conf.input.path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test")
            .join("swissmetro_sample.dat")
            .to_string_lossy()
            .to_string();
        let table = prepare(&conf, false).unwrap().long_table;
        (conf, table)
    }

    fn results_json(names: &[String]) -> String {
        let coefficients = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                serde_json::json!({
                    "name": name,
                    "estimate": -0.1 * (i as f64 + 1.0),
                    "std_err": 0.05,
                })
            })
            .rev()
            .collect::<Vec<_>>();
        serde_json::json!({
            "coefficients": coefficients,
            "log_likelihood": -5159.3,
            "null_log_likelihood": -6964.7,
        })
        .to_string()
    }

    #[test]
    fn test_fit_orders_by_specification() {
        let (conf, table) = sample();
        let names = conf.model.coefficient_names();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", results_json(&names)).unwrap();

        let estimator = ResultsFileEstimator::new(file.path());
        let result = estimator
            .fit(&table, &conf.model, &LongColumnNames::from(&table))
            .unwrap();
        let fitted_names = result
            .coefficients
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<_>>();
        assert_eq!(fitted_names, names);
        assert_eq!(result.n_observations, 9);
        assert_eq!(result.log_likelihood, -5159.3);
    }

    #[test]
    fn test_fit_missing_coefficient() {
        let (conf, table) = sample();
        let names = conf.model.coefficient_names();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", results_json(&names[1..])).unwrap();

        let estimator = ResultsFileEstimator::new(file.path());
        let result = estimator.fit(&table, &conf.model, &LongColumnNames::from(&table));
        match result {
            Err(ChoiceDataError::EstimationError(msg)) => assert!(msg.contains("ASC Train")),
            other => panic!("expected EstimationError, found {other:?}"),
        }
    }
}
