mod pipeline_ops;
mod sample_summary;

pub use pipeline_ops::{prepare, prepare_table, PreparedSample};
pub use sample_summary::SampleSummary;
