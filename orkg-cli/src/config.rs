//! Command-line arguments and the resolved pipeline configuration.

use camino::Utf8PathBuf;
use clap::Parser;
use orkg_data::Progress;
use orkg_data::dump::{DEFAULT_USER_AGENT, DumpUrl};
use orkg_data::graph::{CachePolicy, CacheRequest};
use orkg_data::layout::ArtefactLayout;
use orkg_fs::ensure_dir;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const ARG_URL: &str = "url";
const DEFAULT_DATA_DIR: &str = ".";

/// CLI arguments for a pipeline run.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "orkg-kge",
    about = "Download and prepare the ORKG for knowledge graph embedding",
    long_about = "Download the ORKG N-Triples dump, remove malformed lines, \
                 cache the parsed graph and export its edges as \
                 tab-separated rows. Every option can also come from \
                 configuration files or environment variables.",
    version
)]
#[ortho_config(prefix = "ORKG_KGE")]
pub struct PipelineArgs {
    /// Directory holding every artefact (defaults to the working directory).
    #[arg(long = "data-dir", value_name = "path")]
    #[serde(default)]
    pub data_dir: Option<Utf8PathBuf>,
    /// Location of the N-Triples dump.
    #[arg(long = ARG_URL, value_name = "url")]
    #[serde(default)]
    pub url: Option<String>,
    /// User agent sent with the download request.
    #[arg(long = "user-agent", value_name = "agent")]
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Reuse the graph snapshot only if the cleaned dump is unchanged.
    #[arg(long = "verify-cache")]
    #[serde(default, skip_serializing_if = "is_unset")]
    pub verify_cache: bool,
    /// Ignore any graph snapshot and parse the cleaned dump again.
    #[arg(long = "rebuild-cache")]
    #[serde(default, skip_serializing_if = "is_unset")]
    pub rebuild_cache: bool,
    /// Do not draw progress bars.
    #[arg(long = "no-progress")]
    #[serde(default, skip_serializing_if = "is_unset")]
    pub no_progress: bool,
}

// An absent switch must not mask a value from a file or the environment.
const fn is_unset(flag: &bool) -> bool {
    !*flag
}

impl PipelineArgs {
    /// Layer configuration files and environment variables under the
    /// arguments, then resolve the result.
    pub fn into_config(self) -> Result<PipelineConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PipelineConfig::try_from(merged)
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PipelineConfig, CliError> {
    let merged = PipelineArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PipelineConfig::try_from(merged)
}

/// Fully resolved settings for [`crate::pipeline::run_pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Artefact locations.
    pub layout: ArtefactLayout,
    /// Dump location.
    pub url: DumpUrl,
    /// User agent for the download.
    pub user_agent: String,
    /// Treatment of an existing graph snapshot.
    pub cache_policy: CachePolicy,
    /// Progress bar visibility.
    pub progress: Progress,
}

impl PipelineConfig {
    /// Default settings rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            layout: ArtefactLayout::new(data_dir),
            url: DumpUrl::default(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            cache_policy: CachePolicy::default(),
            progress: Progress::default(),
        }
    }

    /// Create the data directory if it is missing.
    pub fn prepare_data_dir(&self) -> Result<(), CliError> {
        let path = self.layout.data_dir();
        ensure_dir(path).map_err(|source| CliError::PrepareDataDir {
            path: path.to_owned(),
            source,
        })
    }

    /// Graph cache inputs derived from the layout.
    #[must_use]
    pub fn cache_request(&self) -> CacheRequest {
        CacheRequest::new(
            self.layout.cleaned_dump(),
            self.layout.turtle(),
            self.layout.snapshot(),
        )
        .with_policy(self.cache_policy)
        .with_progress(self.progress)
    }
}

impl TryFrom<PipelineArgs> for PipelineConfig {
    type Error = CliError;

    fn try_from(args: PipelineArgs) -> Result<Self, Self::Error> {
        let mut config =
            Self::new(args.data_dir.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR)));
        if let Some(url) = args.url {
            config.url = DumpUrl::try_from(url.as_str()).map_err(|source| {
                CliError::InvalidUrl {
                    field: ARG_URL,
                    value: url.clone(),
                    source,
                }
            })?;
        }
        if let Some(user_agent) = args.user_agent {
            config.user_agent = user_agent;
        }
        config.cache_policy = match (args.rebuild_cache, args.verify_cache) {
            (true, _) => CachePolicy::Rebuild,
            (false, true) => CachePolicy::Verify,
            (false, false) => CachePolicy::Reuse,
        };
        config.progress = Progress::from_enabled(!args.no_progress);
        Ok(config)
    }
}
