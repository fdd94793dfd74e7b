//! Loading the cleaned dump into memory, with an on-disk snapshot cache.
//!
//! Parsing the full dump is slow, so the first load persists the graph as a
//! binary snapshot and a Turtle export. Later loads restore the snapshot
//! according to the [`CachePolicy`].

use camino::Utf8PathBuf;
use orkg_core::{SnapshotError, SnapshotWriteError};
use oxrdf::IriParseError;
use oxrdfio::RdfSyntaxError;
use thiserror::Error;

mod cache;
mod rdf;

pub use cache::{CachePolicy, CacheRequest, GraphOrigin, LoadedGraph, digest_file, load_or_build};
pub use rdf::{ORKG_PREFIXES, parse_ntriples, write_turtle};

/// Errors raised while loading, caching or serialising the graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// The cleaned dump could not be opened.
    #[error("failed to open cleaned dump at {path}: {source}")]
    OpenInput {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },
    /// Reading N-Triples input failed part way.
    #[error("failed to read N-Triples input: {source}")]
    ReadInput {
        #[source]
        source: std::io::Error,
    },
    /// The input is not valid N-Triples.
    #[error("invalid N-Triples input: {source}")]
    Parse {
        #[source]
        source: RdfSyntaxError,
    },
    /// A Turtle prefix could not be registered.
    #[error("invalid Turtle prefix `{prefix}`: {source}")]
    Prefix {
        #[source]
        source: IriParseError,
        prefix: &'static str,
    },
    /// A statement cannot be expressed as an RDF triple.
    #[error("statement with subject {subject} cannot be serialised: {reason}")]
    InvalidStatement {
        subject: String,
        reason: &'static str,
    },
    /// Serialising Turtle failed.
    #[error("failed to write Turtle output: {source}")]
    WriteTurtle {
        #[source]
        source: std::io::Error,
    },
    /// An existing snapshot could not be restored.
    #[error("failed to read graph snapshot at {path}: {source}")]
    ReadSnapshot {
        #[source]
        source: SnapshotError,
        path: Utf8PathBuf,
    },
    /// Encoding the snapshot failed.
    #[error("failed to encode graph snapshot for {path}: {source}")]
    WriteSnapshot {
        #[source]
        source: SnapshotWriteError,
        path: Utf8PathBuf,
    },
    /// Hashing the cleaned dump failed.
    #[error("failed to hash cleaned dump at {path}: {source}")]
    Digest {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },
    /// Inspecting, staging or committing a cache artefact failed.
    #[error("failed to persist cache artefact at {path}: {source}")]
    Persist {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },
}
