//! Command line pipeline reproducing the Swissmetro multinomial logit
//! example: read the survey, filter it, reshape it to long format, derive
//! model variables and check fitted coefficients against a reference.
pub mod app;
pub mod config;
pub mod estimation;
pub mod pipeline;
