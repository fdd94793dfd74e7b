use std::io::{self, BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use orkg_core::Graph;
use orkg_core::snapshot::{read_snapshot, write_snapshot};
use orkg_fs::{AtomicFile, open_utf8_file, path_exists};
use sha2::{Digest, Sha256};

use super::{GraphError, parse_ntriples, write_turtle};
use crate::Progress;

/// How an existing snapshot is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Restore any existing snapshot without consulting the cleaned dump.
    #[default]
    Reuse,
    /// Restore the snapshot only when it was built from the current cleaned
    /// dump, judged by SHA-256 digest.
    Verify,
    /// Ignore any snapshot and rebuild from the cleaned dump.
    Rebuild,
}

/// Where a [`LoadedGraph`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOrigin {
    /// Restored from the snapshot cache.
    Snapshot,
    /// Parsed from the cleaned dump; cache artefacts were rewritten.
    Parsed,
}

/// The graph returned by [`load_or_build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedGraph {
    /// Statements in memory.
    pub graph: Graph,
    /// Whether the cache was used.
    pub origin: GraphOrigin,
}

/// Inputs to [`load_or_build`].
#[derive(Debug, Clone)]
pub struct CacheRequest {
    /// Cleaned N-Triples dump.
    pub source: Utf8PathBuf,
    /// Turtle export written on rebuild.
    pub turtle: Utf8PathBuf,
    /// Binary snapshot.
    pub snapshot: Utf8PathBuf,
    /// Treatment of an existing snapshot.
    pub policy: CachePolicy,
    /// Progress display while parsing.
    pub progress: Progress,
}

impl CacheRequest {
    /// Describe a load using the default policy and visible progress.
    #[must_use]
    pub fn new(
        source: impl Into<Utf8PathBuf>,
        turtle: impl Into<Utf8PathBuf>,
        snapshot: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            turtle: turtle.into(),
            snapshot: snapshot.into(),
            policy: CachePolicy::default(),
            progress: Progress::default(),
        }
    }

    /// Replace the cache policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the progress setting.
    #[must_use]
    pub const fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }
}

/// Return the graph for the cleaned dump, restoring or rebuilding the cache.
///
/// With [`CachePolicy::Reuse`] an existing snapshot is returned as-is and the
/// cleaned dump is never opened, even when it has changed since the snapshot
/// was taken. A rebuild writes the Turtle export first and the snapshot last,
/// so a snapshot on disk always has a matching Turtle export beside it.
pub fn load_or_build(request: &CacheRequest) -> Result<LoadedGraph, GraphError> {
    if request.policy != CachePolicy::Rebuild && snapshot_present(&request.snapshot)? {
        info!("loading graph snapshot from {}", request.snapshot);
        let snapshot = read_snapshot_file(&request.snapshot)?;
        let reusable = match request.policy {
            CachePolicy::Verify => {
                let current = digest_file(&request.source)?;
                let matches = snapshot.source_digest.as_deref() == Some(current.as_str());
                if !matches {
                    warn!(
                        "snapshot at {} was built from a different cleaned dump; rebuilding",
                        request.snapshot
                    );
                }
                matches
            }
            _ => true,
        };
        if reusable {
            info!("restored {} statements from snapshot", snapshot.graph.len());
            return Ok(LoadedGraph {
                graph: snapshot.graph,
                origin: GraphOrigin::Snapshot,
            });
        }
    }
    rebuild(request)
}

/// SHA-256 of the file at `path`, hex encoded.
pub fn digest_file(path: &Utf8Path) -> Result<String, GraphError> {
    let digest_error = |source| GraphError::Digest {
        source,
        path: path.to_owned(),
    };
    let mut file = open_utf8_file(path).map_err(digest_error)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(digest_error)?;
    Ok(hex::encode(hasher.finalize()))
}

fn rebuild(request: &CacheRequest) -> Result<LoadedGraph, GraphError> {
    info!("parsing cleaned dump at {}", request.source);
    let input = open_utf8_file(&request.source).map_err(|source| GraphError::OpenInput {
        source,
        path: request.source.clone(),
    })?;
    let bar = request.progress.bytes("parsing cleaned dump");
    let mut reader = HashingReader::new(bar.wrap_read(input));
    let graph = parse_ntriples(BufReader::new(&mut reader))?;
    let digest = reader.finish();
    bar.finish_and_clear();
    info!("parsed {} statements", graph.len());

    persist(&request.turtle, |file| {
        write_turtle(&graph, file).map(drop)
    })?;
    debug!("wrote Turtle export to {}", request.turtle);

    persist(&request.snapshot, |file| {
        write_snapshot(file, &graph, Some(digest.as_str())).map_err(|source| {
            GraphError::WriteSnapshot {
                source,
                path: request.snapshot.clone(),
            }
        })
    })?;
    info!("cached graph snapshot at {}", request.snapshot);

    Ok(LoadedGraph {
        graph,
        origin: GraphOrigin::Parsed,
    })
}

fn snapshot_present(path: &Utf8Path) -> Result<bool, GraphError> {
    path_exists(path).map_err(|source| GraphError::Persist {
        source,
        path: path.to_owned(),
    })
}

fn read_snapshot_file(path: &Utf8Path) -> Result<orkg_core::Snapshot, GraphError> {
    let file = open_utf8_file(path).map_err(|source| GraphError::Persist {
        source,
        path: path.to_owned(),
    })?;
    read_snapshot(BufReader::new(file)).map_err(|source| GraphError::ReadSnapshot {
        source,
        path: path.to_owned(),
    })
}

fn persist<F>(path: &Utf8Path, write: F) -> Result<(), GraphError>
where
    F: FnOnce(&mut AtomicFile) -> Result<(), GraphError>,
{
    let persist_error = |source| GraphError::Persist {
        source,
        path: path.to_owned(),
    };
    let mut file = AtomicFile::create(path).map_err(persist_error)?;
    write(&mut file)?;
    file.commit().map_err(persist_error)
}

/// Reader adaptor hashing every byte that passes through it.
struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
}

impl<R: Read> HashingReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        if let Some(filled) = buf.get(..read) {
            self.hasher.update(filled);
        }
        Ok(read)
    }
}
