//! Tab-separated edge export for embedding tools.
//!
//! Each statement whose object is an IRI or blank node becomes one
//! `subject\tpredicate\tobject` row. Statements with literal objects are
//! attributes rather than edges and are left out. There is no header row.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use orkg_core::Graph;
use orkg_fs::AtomicFile;
use thiserror::Error;

use crate::Progress;

/// Counts observed while exporting edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Rows written.
    pub rows_written: u64,
    /// Statements left out because their object is a literal.
    pub literals_skipped: u64,
}

/// Errors raised while exporting edges.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing a row failed.
    #[error("failed to write edge row: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
    /// The export file could not be staged or committed.
    #[error("failed to write edge export to {path}: {source}")]
    Persist {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },
}

/// Write one row per edge of `graph` to `writer`.
///
/// Rows follow the graph's iteration order.
///
/// # Examples
/// ```
/// use orkg_core::{Graph, Statement, Term};
/// use orkg_data::{Progress, export::export_edges};
///
/// let graph: Graph = [
///     Statement::new(Term::iri("s1"), Term::iri("p1"), Term::simple_literal("lit")),
///     Statement::new(Term::iri("s1"), Term::iri("p2"), Term::iri("o2")),
/// ]
/// .into_iter()
/// .collect();
/// let mut rows = Vec::new();
/// let report = export_edges(&graph, &mut rows, Progress::Hidden)?;
/// assert_eq!(String::from_utf8(rows)?, "s1\tp2\to2\n");
/// assert_eq!(report.literals_skipped, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn export_edges<W: Write>(
    graph: &Graph,
    mut writer: W,
    progress: Progress,
) -> Result<ExportReport, ExportError> {
    let total = u64::try_from(graph.len()).unwrap_or(u64::MAX);
    let bar = progress.items(total, "exporting edges");
    let mut report = ExportReport::default();
    for statement in bar.wrap_iter(graph.iter()) {
        if !statement.is_edge() {
            report.literals_skipped += 1;
            continue;
        }
        writeln!(
            writer,
            "{}\t{}\t{}",
            statement.subject, statement.predicate, statement.object
        )
        .map_err(|source| ExportError::Write { source })?;
        report.rows_written += 1;
    }
    writer
        .flush()
        .map_err(|source| ExportError::Write { source })?;
    bar.finish_and_clear();
    Ok(report)
}

/// Export edges of `graph` to the file at `path`, replacing it atomically.
///
/// The export is rewritten on every call. An empty graph still produces an
/// (empty) file.
pub fn export_edges_to_path(
    graph: &Graph,
    path: &Utf8Path,
    progress: Progress,
) -> Result<ExportReport, ExportError> {
    let persist_error = |source| ExportError::Persist {
        source,
        path: path.to_owned(),
    };
    info!("exporting {} statements to {path}", graph.len());
    let mut file = AtomicFile::create(path).map_err(persist_error)?;
    let report = export_edges(graph, &mut file, progress)?;
    file.commit().map_err(persist_error)?;
    info!(
        "wrote {} rows ({} literal statements skipped)",
        report.rows_written, report.literals_skipped
    );
    Ok(report)
}
