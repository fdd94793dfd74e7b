//! Behavioural coverage for the end-to-end pipeline.

use super::helpers::{SAMPLE_DUMP, SAMPLE_ROW, scratch_config};
use super::*;
use orkg_data::dump::{StubSource, block_on_for_tests};
use orkg_data::graph::GraphOrigin;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::{cell::RefCell, fs};
use tempfile::TempDir;

#[derive(Debug)]
struct PipelineWorld {
    _workspace: TempDir,
    config: PipelineConfig,
    source: RefCell<Option<StubSource>>,
    outcome: RefCell<Option<Result<PipelineReport, CliError>>>,
}

impl PipelineWorld {
    fn new() -> Self {
        let (workspace, config) = scratch_config();
        Self {
            _workspace: workspace,
            config,
            source: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn run(&self) -> Result<PipelineReport, CliError> {
        let source = self.source.borrow();
        let source = source
            .as_ref()
            .unwrap_or_else(|| panic!("dump source should be initialised"));
        block_on_for_tests(run_pipeline(&self.config, source))
    }

    fn report(&self) -> PipelineReport {
        match self.outcome.borrow().as_ref() {
            Some(Ok(report)) => report.clone(),
            Some(Err(err)) => panic!("pipeline should succeed: {err}"),
            None => panic!("pipeline outcome must be captured"),
        }
    }

    fn requests(&self) -> usize {
        self.source
            .borrow()
            .as_ref()
            .map(StubSource::requests)
            .unwrap_or_else(|| panic!("dump source should be initialised"))
    }
}

#[fixture]
fn pipeline_world() -> PipelineWorld {
    PipelineWorld::new()
}

#[given("an empty data directory")]
fn empty_data_dir(#[from(pipeline_world)] world: &PipelineWorld) {
    assert!(!world.config.layout.data_dir().exists());
}

#[given("a dump source serving a dump with a malformed line")]
fn dump_source(#[from(pipeline_world)] world: &PipelineWorld) {
    world
        .source
        .replace(Some(StubSource::new(SAMPLE_DUMP.as_bytes().to_vec())));
}

#[given("the pipeline has already run")]
fn already_run(#[from(pipeline_world)] world: &PipelineWorld) {
    if let Err(err) = world.run() {
        panic!("first run should succeed: {err}");
    }
}

#[when("I run the pipeline")]
fn run_the_pipeline(#[from(pipeline_world)] world: &PipelineWorld) {
    let outcome = world.run();
    world.outcome.replace(Some(outcome));
}

#[then("every artefact exists")]
fn every_artefact_exists(#[from(pipeline_world)] world: &PipelineWorld) {
    world.report();
    let layout = &world.config.layout;
    for path in [
        layout.raw_dump(),
        layout.cleaned_dump(),
        layout.turtle(),
        layout.snapshot(),
        layout.edges(),
    ] {
        assert!(path.is_file(), "missing artefact {path}");
    }
}

#[then("the edge export holds one row")]
fn one_row(#[from(pipeline_world)] world: &PipelineWorld) {
    assert_eq!(world.report().export.rows_written, 1);
    let rows = match fs::read_to_string(world.config.layout.edges()) {
        Ok(rows) => rows,
        Err(err) => panic!("failed to read edge export: {err}"),
    };
    assert_eq!(rows, SAMPLE_ROW);
}

#[then("the dump was downloaded once")]
fn downloaded_once(#[from(pipeline_world)] world: &PipelineWorld) {
    world.report();
    assert_eq!(world.requests(), 1);
}

#[then("the graph came from the snapshot")]
fn from_snapshot(#[from(pipeline_world)] world: &PipelineWorld) {
    assert_eq!(world.report().graph_origin, GraphOrigin::Snapshot);
}

#[scenario(
    path = "tests/features/pipeline.feature",
    name = "running the pipeline in an empty data directory"
)]
fn running_in_an_empty_data_directory(#[from(pipeline_world)] world: PipelineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/pipeline.feature", name = "running the pipeline again")]
fn running_the_pipeline_again(#[from(pipeline_world)] world: PipelineWorld) {
    let _ = world;
}
