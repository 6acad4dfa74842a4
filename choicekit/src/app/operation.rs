use super::AppError;
use crate::{
    config::PipelineConfig,
    estimation::{read_reference, ResultsFileEstimator},
    pipeline::{self, SampleSummary},
};
use choicekit_core::{
    estimation::{ChoiceModelEstimator, ComparisonReport, LongColumnNames},
    ChoiceDataError,
};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum ChoicekitOperation {
    /// filter and reshape the survey, then print the sample summary
    Summary {
        /// survey file, overriding the configured input path
        #[arg(long)]
        input: Option<String>,
        /// print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// filter and reshape the survey, then write the long table as CSV to stdout
    Export {
        /// survey file, overriding the configured input path
        #[arg(long)]
        input: Option<String>,
    },
    /// compare externally fitted coefficients against a published reference
    Compare {
        /// JSON file of fitted coefficients, log-likelihood and standard errors
        #[arg(long)]
        results: String,
        /// JSON file of reference coefficients
        #[arg(long)]
        reference: String,
        /// absolute tolerance for each compared value
        #[arg(long, default_value_t = 1e-3)]
        tolerance: f64,
        /// survey file, overriding the configured input path
        #[arg(long)]
        input: Option<String>,
    },
}

impl ChoicekitOperation {
    pub fn run(&self, mut conf: PipelineConfig) -> Result<(), AppError> {
        if let Some(input) = self.input() {
            conf.input.path = input.clone();
        }
        let sample = pipeline::prepare(&conf, true)?;
        match self {
            ChoicekitOperation::Summary { json, .. } => {
                let summary = SampleSummary::from(&sample);
                if *json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    println!("{summary}");
                }
                Ok(())
            }
            ChoicekitOperation::Export { .. } => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                sample.long_table.write_csv(&mut handle)?;
                handle
                    .flush()
                    .map_err(|e| ChoiceDataError::WriteError(e.to_string()))?;
                Ok(())
            }
            ChoicekitOperation::Compare {
                results,
                reference,
                tolerance,
                ..
            } => {
                let estimator = ResultsFileEstimator::new(results);
                let columns = LongColumnNames::from(&sample.long_table);
                let fitted = estimator.fit(&sample.long_table, &conf.model, &columns)?;
                let expected = read_reference(reference)?;
                let report = ComparisonReport::new(&fitted, &expected, *tolerance);
                println!("{fitted}");
                println!("{report}");
                if report.is_match() {
                    Ok(())
                } else {
                    Err(AppError::ReferenceMismatch(*tolerance))
                }
            }
        }
    }

    fn input(&self) -> Option<&String> {
        match self {
            ChoicekitOperation::Summary { input, .. } => input.as_ref(),
            ChoicekitOperation::Export { input } => input.as_ref(),
            ChoicekitOperation::Compare { input, .. } => input.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChoicekitOperation;
    use crate::{app::AppError, config::PipelineConfig};
    use std::{io::Write, path::PathBuf};

    fn sample_config() -> PipelineConfig {
        let mut conf = PipelineConfig::swissmetro().unwrap();
        conf.input.path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test")
            .join("swissmetro_sample.dat")
            .to_string_lossy()
            .to_string();
        conf
    }

    fn json_file(value: serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    /// fitted results file plus a reference whose estimates are offset by `shift`.
    fn results_and_reference(
        conf: &PipelineConfig,
        shift: f64,
    ) -> (tempfile::NamedTempFile, tempfile::NamedTempFile) {
        let names = conf.model.coefficient_names();
        let estimate = |i: usize| -0.1 * (i as f64 + 1.0);
        let fitted = names
            .iter()
            .enumerate()
            .map(|(i, name)| serde_json::json!({ "name": name, "estimate": estimate(i), "std_err": 0.05 }))
            .collect::<Vec<_>>();
        let reference = names
            .iter()
            .enumerate()
            .map(|(i, name)| serde_json::json!({ "name": name, "estimate": estimate(i) + shift }))
            .collect::<Vec<_>>();
        let results = json_file(serde_json::json!({
            "coefficients": fitted,
            "log_likelihood": -5.5,
        }));
        let reference = json_file(serde_json::json!({
            "coefficients": reference,
            "log_likelihood": -5.5,
        }));
        (results, reference)
    }

    fn compare(results: &tempfile::NamedTempFile, reference: &tempfile::NamedTempFile) -> ChoicekitOperation {
        ChoicekitOperation::Compare {
            results: results.path().to_string_lossy().to_string(),
            reference: reference.path().to_string_lossy().to_string(),
            tolerance: 1e-3,
            input: None,
        }
    }

    #[test]
    fn test_compare_matching_reference() {
        let conf = sample_config();
        let (results, reference) = results_and_reference(&conf, 0.0);
        compare(&results, &reference)
            .run(conf)
            .expect("identical estimates should match");
    }

    #[test]
    fn test_compare_mismatching_reference() {
        let conf = sample_config();
        let (results, reference) = results_and_reference(&conf, 0.01);
        let result = compare(&results, &reference).run(conf);
        assert!(matches!(result, Err(AppError::ReferenceMismatch(t)) if t == 1e-3));
    }

    #[test]
    fn test_input_overrides_configured_path() {
        let mut conf = sample_config();
        let input = conf.input.path.clone();
        conf.input.path = String::from("does/not/exist.dat");
        let op = ChoicekitOperation::Summary {
            input: Some(input),
            json: true,
        };
        op.run(conf).expect("the --input path should be read");
    }
}
