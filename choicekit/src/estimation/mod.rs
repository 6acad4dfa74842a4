mod results_file_estimator;

pub use results_file_estimator::{read_reference, ResultsFileEstimator};
