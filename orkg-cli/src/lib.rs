//! Command-line interface for preparing the ORKG embedding dataset.
#![forbid(unsafe_code)]

use clap::Parser;
use orkg_data::dump::HttpDumpSource;

mod config;
mod error;
pub mod pipeline;

pub use config::{PipelineArgs, PipelineConfig};
pub use error::CliError;
pub use pipeline::{PipelineReport, run_pipeline};

/// Run the ORKG KGE CLI with the current process arguments and environment.
pub async fn run() -> Result<PipelineReport, CliError> {
    let args = PipelineArgs::try_parse().map_err(CliError::ArgumentParsing)?;
    let config = args.into_config()?;
    let source = HttpDumpSource::new()
        .map_err(CliError::HttpClient)?
        .with_user_agent(config.user_agent.as_str());
    run_pipeline(&config, &source).await
}

#[cfg(test)]
mod tests;
