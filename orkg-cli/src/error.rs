//! Error types emitted by the ORKG KGE CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use orkg_data::dump::{DumpError, TransportError};
use orkg_data::export::ExportError;
use orkg_data::graph::GraphError;
use orkg_data::sanitise::SanitiseError;
use thiserror::Error;

/// Errors emitted by the ORKG KGE CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The dump URL could not be parsed.
    #[error("invalid --{field} value {value:?}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The data directory could not be created.
    #[error("failed to prepare data directory {path:?}: {source}")]
    PrepareDataDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Building the HTTP client failed.
    #[error(transparent)]
    HttpClient(TransportError),
    /// Downloading the dump failed.
    #[error(transparent)]
    Download(#[from] DumpError),
    /// Removing malformed lines failed.
    #[error(transparent)]
    Sanitise(#[from] SanitiseError),
    /// Loading or caching the graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Writing the edge export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}
