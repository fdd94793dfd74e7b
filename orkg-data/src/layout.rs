//! Artefact locations inside the data directory.

use camino::{Utf8Path, Utf8PathBuf};

const RAW_DUMP: &str = "raw.nt";
const CLEANED_DUMP: &str = "processed.nt";
const TURTLE: &str = "processed.ttl";
const SNAPSHOT: &str = "processed.pkl";
const EDGES: &str = "processed.tsv";

/// Paths of every artefact the pipeline reads or writes.
///
/// # Examples
/// ```
/// use orkg_data::layout::ArtefactLayout;
///
/// let layout = ArtefactLayout::new("data");
/// assert_eq!(layout.raw_dump().as_str(), "data/raw.nt");
/// assert_eq!(layout.edges().as_str(), "data/processed.tsv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactLayout {
    data_dir: Utf8PathBuf,
    raw_dump: Utf8PathBuf,
    cleaned_dump: Utf8PathBuf,
    turtle: Utf8PathBuf,
    snapshot: Utf8PathBuf,
    edges: Utf8PathBuf,
}

impl ArtefactLayout {
    /// Derive artefact paths beneath `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl Into<Utf8PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            raw_dump: data_dir.join(RAW_DUMP),
            cleaned_dump: data_dir.join(CLEANED_DUMP),
            turtle: data_dir.join(TURTLE),
            snapshot: data_dir.join(SNAPSHOT),
            edges: data_dir.join(EDGES),
            data_dir,
        }
    }

    /// Directory holding every artefact.
    #[must_use]
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// Downloaded dump, exactly as served.
    #[must_use]
    pub fn raw_dump(&self) -> &Utf8Path {
        &self.raw_dump
    }

    /// Dump with malformed lines removed.
    #[must_use]
    pub fn cleaned_dump(&self) -> &Utf8Path {
        &self.cleaned_dump
    }

    /// Turtle rendering of the parsed graph.
    #[must_use]
    pub fn turtle(&self) -> &Utf8Path {
        &self.turtle
    }

    /// Binary snapshot of the parsed graph.
    #[must_use]
    pub fn snapshot(&self) -> &Utf8Path {
        &self.snapshot
    }

    /// Tab-separated edge export.
    #[must_use]
    pub fn edges(&self) -> &Utf8Path {
        &self.edges
    }
}
