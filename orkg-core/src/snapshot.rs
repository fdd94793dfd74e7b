//! Persisted graph snapshot format.
//!
//! A snapshot is a fixed header (`OKGS` magic followed by a little-endian
//! format version) and a `bincode` payload holding the digest of the source
//! the graph was parsed from and the ordered statement list. Loading a
//! snapshot restores the graph with its original iteration order.

use std::io::{Read, Write};

use bincode::{deserialize_from, serialize_into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Graph, Statement};

/// File identifier for persisted graph snapshots.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"OKGS";

/// Supported version of the persisted snapshot format.
pub const SNAPSHOT_VERSION: u16 = 1;

#[derive(Debug, Serialize)]
struct SnapshotFile<'a> {
    magic: [u8; 4],
    version: u16,
    source_digest: Option<&'a str>,
    statements: &'a [Statement],
}

#[derive(Debug, Deserialize)]
struct SnapshotPayload {
    source_digest: Option<String>,
    statements: Vec<Statement>,
}

/// A graph restored from a snapshot together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Hex-encoded SHA-256 digest of the source the graph was parsed from,
    /// when one was recorded.
    pub source_digest: Option<String>,
    /// The restored graph.
    pub graph: Graph,
}

/// Error emitted when reading or validating a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The header could not be read.
    #[error("failed to read snapshot header: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The payload could not be decoded.
    #[error("failed to decode snapshot payload: {source}")]
    Decode {
        /// Decoder error returned by `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// The input did not start with the snapshot magic.
    #[error("invalid snapshot magic: expected {expected:?}, found {found:?}")]
    InvalidMagic {
        /// Expected byte sequence identifying a snapshot.
        expected: [u8; 4],
        /// Sequence read from the input.
        found: [u8; 4],
    },
    /// The snapshot was written by an incompatible format version.
    #[error("unsupported snapshot version {found}; supported version is {supported}")]
    UnsupportedVersion {
        /// Version present in the header.
        found: u16,
        /// Version understood by this binary.
        supported: u16,
    },
}

/// Error emitted when writing a snapshot.
#[derive(Debug, Error)]
#[error("failed to encode snapshot: {source}")]
pub struct SnapshotWriteError {
    /// Encoder failure from `bincode`, including I/O errors from the sink.
    #[source]
    pub source: bincode::Error,
}

/// Serialise `graph` into `writer`.
///
/// The writer is not flushed; callers owning a buffered or staged file must
/// flush or commit it themselves.
///
/// # Examples
/// ```
/// use orkg_core::{Graph, Statement, Term};
/// use orkg_core::snapshot::{read_snapshot, write_snapshot};
///
/// let graph: Graph = [Statement::new(
///     Term::iri("http://example.org/s"),
///     Term::iri("http://example.org/p"),
///     Term::simple_literal("o"),
/// )]
/// .into_iter()
/// .collect();
/// let mut bytes = Vec::new();
/// write_snapshot(&mut bytes, &graph, Some("abc"))?;
/// let snapshot = read_snapshot(bytes.as_slice())?;
/// assert_eq!(snapshot.graph, graph);
/// assert_eq!(snapshot.source_digest.as_deref(), Some("abc"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_snapshot<W: Write>(
    writer: W,
    graph: &Graph,
    source_digest: Option<&str>,
) -> Result<(), SnapshotWriteError> {
    let file = SnapshotFile {
        magic: SNAPSHOT_MAGIC,
        version: SNAPSHOT_VERSION,
        source_digest,
        statements: graph.as_slice(),
    };
    serialize_into(writer, &file).map_err(|source| SnapshotWriteError { source })
}

/// Restore a graph from a snapshot produced by [`write_snapshot`].
pub fn read_snapshot<R: Read>(mut reader: R) -> Result<Snapshot, SnapshotError> {
    let mut magic = [0_u8; 4];
    reader
        .read_exact(&mut magic)
        .map_err(|source| SnapshotError::Io { source })?;
    if magic != SNAPSHOT_MAGIC {
        return Err(SnapshotError::InvalidMagic {
            expected: SNAPSHOT_MAGIC,
            found: magic,
        });
    }

    let mut version_bytes = [0_u8; 2];
    reader
        .read_exact(&mut version_bytes)
        .map_err(|source| SnapshotError::Io { source })?;
    let version = u16::from_le_bytes(version_bytes);
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: version,
            supported: SNAPSHOT_VERSION,
        });
    }

    let payload: SnapshotPayload =
        deserialize_from(reader).map_err(|source| SnapshotError::Decode { source })?;
    Ok(Snapshot {
        source_digest: payload.source_digest,
        graph: payload.statements.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Literal, Term};
    use rstest::{fixture, rstest};

    #[fixture]
    fn sample_graph() -> Graph {
        [
            Statement::new(
                Term::iri("http://orkg.org/orkg/resource/R1"),
                Term::iri("http://www.w3.org/2000/01/rdf-schema#label"),
                Term::Literal(Literal::language_tagged("Graphs", "en")),
            ),
            Statement::new(
                Term::iri("http://orkg.org/orkg/resource/R1"),
                Term::iri("http://orkg.org/orkg/predicate/P31"),
                Term::blank_node("b7"),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn encode(graph: &Graph, digest: Option<&str>) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_snapshot(&mut bytes, graph, digest).expect("encode snapshot");
        bytes
    }

    #[rstest]
    fn restores_statement_order(sample_graph: Graph) {
        let snapshot = read_snapshot(encode(&sample_graph, None).as_slice()).expect("decode");
        assert_eq!(snapshot.graph.as_slice(), sample_graph.as_slice());
        assert_eq!(snapshot.source_digest, None);
    }

    #[rstest]
    fn writes_header_before_payload(sample_graph: Graph) {
        let bytes = encode(&sample_graph, Some("feed"));
        assert_eq!(bytes.get(..4), Some(&SNAPSHOT_MAGIC[..]));
        assert_eq!(bytes.get(4..6), Some(&SNAPSHOT_VERSION.to_le_bytes()[..]));
    }

    #[rstest]
    fn rejects_invalid_magic() {
        let error = read_snapshot(&b"BAD!\x01\x00"[..]).expect_err("invalid magic should fail");
        assert!(matches!(error, SnapshotError::InvalidMagic { found, .. } if &found == b"BAD!"));
    }

    #[rstest]
    fn rejects_truncated_header() {
        let error = read_snapshot(&SNAPSHOT_MAGIC[..]).expect_err("missing version should fail");
        assert!(matches!(error, SnapshotError::Io { .. }));
    }

    #[rstest]
    fn rejects_unsupported_version() {
        let mut bytes = SNAPSHOT_MAGIC.to_vec();
        bytes.extend_from_slice(&(SNAPSHOT_VERSION + 1).to_le_bytes());
        let error = read_snapshot(bytes.as_slice()).expect_err("future version should fail");
        assert!(matches!(
            error,
            SnapshotError::UnsupportedVersion { found, supported }
                if found == SNAPSHOT_VERSION + 1 && supported == SNAPSHOT_VERSION
        ));
    }

    #[rstest]
    fn rejects_missing_payload() {
        let mut bytes = SNAPSHOT_MAGIC.to_vec();
        bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
        let error = read_snapshot(bytes.as_slice()).expect_err("empty payload should fail");
        assert!(matches!(error, SnapshotError::Decode { .. }));
    }
}
