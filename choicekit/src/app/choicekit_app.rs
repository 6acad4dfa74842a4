use super::{AppError, ChoicekitOperation};
use crate::config::PipelineConfig;
use clap::Parser;

/// command line tool for preparing discrete choice survey data for
/// multinomial logit estimation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ChoicekitApp {
    #[command(subcommand)]
    pub op: ChoicekitOperation,
    /// pipeline configuration file (.toml or .json). defaults to the
    /// embedded Swissmetro configuration.
    #[arg(long, global = true)]
    pub config: Option<String>,
}

impl ChoicekitApp {
    pub fn run(&self) -> Result<(), AppError> {
        let conf = match &self.config {
            None => {
                log::info!("using embedded Swissmetro configuration");
                PipelineConfig::swissmetro()
            }
            Some(f) => PipelineConfig::from_file(f),
        }?;
        self.op.run(conf)
    }
}
