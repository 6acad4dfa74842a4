//! Wide-to-long preparation of discrete choice survey data for multinomial
//! logit estimation.
//!
//! A run is a single synchronous pass over an in-memory table:
//!   1. [`filter::ObservationFilter`] selects decision events from a [`WideTable`]
//!   2. [`table::assign_observation_ids`] numbers them 1..=n
//!   3. [`reshape::Reshaper`] emits one [`reshape::LongRecord`] per (observation, alternative)
//!   4. [`derived::DerivedVariable`]s append row-local model variables
//!   5. a [`estimation::ChoiceModelEstimator`] fits a [`estimation::ModelSpecification`]
pub mod derived;
pub mod estimation;
pub mod filter;
pub mod reshape;
pub mod table;

mod error;

pub use error::ChoiceDataError;
pub use reshape::LongTable;
pub use table::WideTable;
