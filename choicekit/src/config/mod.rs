mod input_config;
mod pipeline_config;

pub use input_config::InputConfig;
pub use pipeline_config::PipelineConfig;
