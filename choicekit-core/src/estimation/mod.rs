mod estimation_result;
mod estimator;
mod model_specification;
mod reference_comparison;

pub use estimation_result::{Coefficient, EstimationResult};
pub use estimator::{ChoiceModelEstimator, LongColumnNames};
pub use model_specification::{AlternativeGroup, ModelSpecification, SpecificationTerm};
pub use reference_comparison::{
    ComparisonReport, ComparisonRow, ReferenceCoefficient, ReferenceResults,
};
