//! Fixtures shared by the pipeline tests.

use super::*;
use camino::Utf8PathBuf;
use orkg_data::Progress;
use tempfile::TempDir;

/// Dump served by the stub source: one edge, one literal and one malformed
/// line.
pub(super) const SAMPLE_DUMP: &str = concat!(
    "<http://orkg.org/orkg/resource/R1> <http://www.w3.org/2000/01/rdf-schema#label> \"Paper\" .\n",
    "<http://orkg.org/orkg/resource/R1> <http://orkg.org/orkg/predicate/P31> <http://orkg.org/orkg/resource/R2> .\n",
    "<http://orkg.org/orkg/resource/R3> <http://orkg.org/orkg/predicate/P31> <null> .\n",
);

/// The only row expected from [`SAMPLE_DUMP`].
pub(super) const SAMPLE_ROW: &str = "http://orkg.org/orkg/resource/R1\thttp://orkg.org/orkg/predicate/P31\thttp://orkg.org/orkg/resource/R2\n";

/// Temporary data directory plus a config pointing at it.
pub(super) fn scratch_config() -> (TempDir, PipelineConfig) {
    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().join("data")).expect("utf-8 temp dir");
    let mut config = PipelineConfig::new(root);
    config.progress = Progress::Hidden;
    (dir, config)
}
