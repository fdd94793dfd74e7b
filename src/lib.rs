//! Facade crate for the ORKG knowledge graph embedding dataset tooling.
//!
//! This crate re-exports the graph model and the data preparation stages.
//! The `orkg-kge` binary lives in the `orkg-cli` workspace member.

#![forbid(unsafe_code)]

pub use orkg_core::{Graph, Literal, Snapshot, SnapshotError, Statement, Term};

pub use orkg_data::dump::{DumpError, DumpSource, DumpUrl, HttpDumpSource, fetch_dump};
pub use orkg_data::export::{ExportError, ExportReport, export_edges, export_edges_to_path};
pub use orkg_data::graph::{
    CachePolicy, CacheRequest, GraphError, GraphOrigin, LoadedGraph, load_or_build,
    parse_ntriples, write_turtle,
};
pub use orkg_data::layout::ArtefactLayout;
pub use orkg_data::sanitise::{SanitiseError, SanitiseReport, sanitise_dump};
pub use orkg_data::{Progress, StageOutcome};

#[cfg(feature = "test-support")]
pub use orkg_data::dump::StubSource;
