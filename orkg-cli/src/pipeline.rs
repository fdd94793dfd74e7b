//! End-to-end orchestration of the preparation stages.

use log::info;
use orkg_data::StageOutcome;
use orkg_data::dump::{DownloadReport, DumpSource, fetch_dump};
use orkg_data::export::{ExportReport, export_edges_to_path};
use orkg_data::graph::{GraphOrigin, load_or_build};
use orkg_data::sanitise::{SanitiseReport, sanitise_dump};

use crate::{CliError, PipelineConfig};

/// What each stage of a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Dump download.
    pub download: StageOutcome<DownloadReport>,
    /// Removal of malformed lines.
    pub sanitise: StageOutcome<SanitiseReport>,
    /// Whether the graph came from the snapshot cache.
    pub graph_origin: GraphOrigin,
    /// Statements in the loaded graph.
    pub statements: usize,
    /// Edge export counts.
    pub export: ExportReport,
}

/// Run every stage in order: fetch, sanitise, load, export.
///
/// The first failing stage aborts the run. Stages whose artefact already
/// exists are skipped, so an interrupted run can simply be repeated.
pub async fn run_pipeline<S: DumpSource + ?Sized>(
    config: &PipelineConfig,
    source: &S,
) -> Result<PipelineReport, CliError> {
    config.prepare_data_dir()?;
    let layout = &config.layout;

    info!("[1/4] fetching dump into {}", layout.raw_dump());
    let download = fetch_dump(source, &config.url, layout.raw_dump(), config.progress).await?;

    info!("[2/4] sanitising {}", layout.raw_dump());
    let sanitise = sanitise_dump(layout.raw_dump(), layout.cleaned_dump())?;

    info!("[3/4] loading graph ({:?} cache policy)", config.cache_policy);
    let loaded = load_or_build(&config.cache_request())?;

    info!("[4/4] exporting edges to {}", layout.edges());
    let export = export_edges_to_path(&loaded.graph, layout.edges(), config.progress)?;

    info!(
        "done: {} statements, {} edge rows in {}",
        loaded.graph.len(),
        export.rows_written,
        layout.edges()
    );
    Ok(PipelineReport {
        download,
        sanitise,
        graph_origin: loaded.origin,
        statements: loaded.graph.len(),
        export,
    })
}
