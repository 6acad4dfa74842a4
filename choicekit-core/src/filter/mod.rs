mod filter_summary;
mod observation_filter;

pub use filter_summary::FilterSummary;
pub use observation_filter::ObservationFilter;
