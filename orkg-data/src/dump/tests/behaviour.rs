//! Behavioural coverage for the dump fetcher.

use crate::dump::test_support::{StubSource, block_on_for_tests};
use crate::dump::{DownloadReport, DumpError, DumpUrl, fetch_dump};
use crate::{Progress, StageOutcome};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::{cell::RefCell, fs};
use tempfile::TempDir;

const SAMPLE_DUMP: &[u8] = b"<http://orkg.org/orkg/resource/R1> <http://orkg.org/orkg/predicate/P1> <http://orkg.org/orkg/resource/R2> .\n";
const EXISTING_DUMP: &[u8] = b"# previously downloaded\n";

type FetchResultCell = RefCell<Option<Result<StageOutcome<DownloadReport>, DumpError>>>;

#[derive(Debug)]
struct FetchWorld {
    _dir: TempDir,
    output_path: Utf8PathBuf,
    source: RefCell<Option<StubSource>>,
    result: FetchResultCell,
}

impl FetchWorld {
    fn new() -> Self {
        let dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(err) => panic!("failed to create temporary directory: {err}"),
        };
        let output_path = Utf8PathBuf::from_path_buf(dir.path().join("raw.nt"))
            .unwrap_or_else(|path| panic!("non-UTF-8 temporary path {path:?}"));
        Self {
            _dir: dir,
            output_path,
            source: RefCell::new(None),
            result: RefCell::new(None),
        }
    }

    fn requests(&self) -> usize {
        self.source
            .borrow()
            .as_ref()
            .map(StubSource::requests)
            .unwrap_or_else(|| panic!("stub source must be initialised"))
    }

    fn outcome(&self) -> StageOutcome<DownloadReport> {
        match self.result.borrow().as_ref() {
            Some(Ok(outcome)) => outcome.clone(),
            Some(Err(err)) => panic!("fetch should succeed: {err}"),
            None => panic!("fetch result must be captured"),
        }
    }
}

#[fixture]
fn fetch_world() -> FetchWorld {
    FetchWorld::new()
}

#[given("a dump source serving N-Triples")]
fn dump_source(#[from(fetch_world)] world: &FetchWorld) {
    *world.source.borrow_mut() = Some(StubSource::new(SAMPLE_DUMP.to_vec()));
}

#[given("no local dump exists")]
fn no_local_dump(#[from(fetch_world)] world: &FetchWorld) {
    assert!(!world.output_path.exists());
}

#[given("a local dump already exists")]
fn local_dump_exists(#[from(fetch_world)] world: &FetchWorld) {
    if let Err(err) = fs::write(&world.output_path, EXISTING_DUMP) {
        panic!("failed to seed existing dump: {err}");
    }
}

#[when("I fetch the dump")]
fn fetch(#[from(fetch_world)] world: &FetchWorld) {
    let source_borrow = world.source.borrow();
    let source = source_borrow
        .as_ref()
        .unwrap_or_else(|| panic!("stub source must be initialised"));
    let outcome = block_on_for_tests(fetch_dump(
        source,
        &DumpUrl::default(),
        &world.output_path,
        Progress::Hidden,
    ));
    *world.result.borrow_mut() = Some(outcome);
}

#[then("the dump is written to disk")]
fn dump_written(#[from(fetch_world)] world: &FetchWorld) {
    let outcome = world.outcome();
    let report = outcome
        .produced()
        .unwrap_or_else(|| panic!("expected a download, got {outcome:?}"));
    assert_eq!(report.output_path, world.output_path);
    let contents = match fs::read(&world.output_path) {
        Ok(bytes) => bytes,
        Err(err) => panic!("failed to read downloaded dump: {err}"),
    };
    assert_eq!(contents, SAMPLE_DUMP);
}

#[then("the existing dump is left untouched")]
fn dump_untouched(#[from(fetch_world)] world: &FetchWorld) {
    assert!(world.outcome().is_reused());
    let contents = match fs::read(&world.output_path) {
        Ok(bytes) => bytes,
        Err(err) => panic!("failed to read existing dump: {err}"),
    };
    assert_eq!(contents, EXISTING_DUMP);
}

#[then("the source was contacted once")]
fn contacted_once(#[from(fetch_world)] world: &FetchWorld) {
    assert_eq!(world.requests(), 1);
}

#[then("the source was never contacted")]
fn never_contacted(#[from(fetch_world)] world: &FetchWorld) {
    assert_eq!(world.requests(), 0);
}

#[scenario(
    path = "tests/features/fetch_dump.feature",
    name = "downloading a missing dump"
)]
fn downloading_a_missing_dump(#[from(fetch_world)] world: FetchWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fetch_dump.feature",
    name = "reusing an existing dump"
)]
fn reusing_an_existing_dump(#[from(fetch_world)] world: FetchWorld) {
    let _ = world;
}
