//! Removal of malformed lines from the raw dump.
//!
//! The published dump contains statements whose IRIs were serialised as the
//! literal text `<null>`. Those lines cannot be parsed as N-Triples, so they
//! are dropped before parsing. Every other line is kept, trimmed of
//! surrounding whitespace.

use std::io::{BufRead, BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use orkg_fs::{AtomicFile, open_utf8_file, path_exists};
use thiserror::Error;

use crate::StageOutcome;

/// Substring identifying a malformed dump line.
pub const MALFORMED_MARKER: &str = "<null>";

/// Line counts observed while sanitising a dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitiseReport {
    /// Lines read from the source.
    pub lines_read: u64,
    /// Lines written to the destination.
    pub lines_kept: u64,
    /// Lines discarded because they contained [`MALFORMED_MARKER`].
    pub lines_dropped: u64,
}

/// Errors that can occur while sanitising a dump.
#[derive(Debug, Error)]
pub enum SanitiseError {
    /// The raw dump could not be opened.
    #[error("failed to open raw dump at {path}: {source}")]
    Open {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },
    /// Reading a line from the raw dump failed.
    #[error("failed to read raw dump at line {line}: {source}")]
    ReadLine {
        #[source]
        source: std::io::Error,
        line: u64,
    },
    /// Writing the cleaned dump failed.
    #[error("failed to write cleaned dump to {path}: {source}")]
    Write {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },
}

/// Copy `reader` to `writer`, dropping malformed lines.
///
/// Lines containing [`MALFORMED_MARKER`] are discarded. Every other line is
/// written with leading and trailing whitespace removed and a trailing
/// newline. Order is preserved and lines are never split or merged.
/// Lines end at `\n`; a bare `\r` does not end a line.
///
/// Write failures surface as [`SanitiseError::Write`] tagged with
/// `destination`.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use orkg_data::sanitise::sanitise_lines;
///
/// let raw = "<a> <b> <c> .\n<a> <b> <null> .\n  <d> <e> <f> .  \n";
/// let mut cleaned = Vec::new();
/// let report = sanitise_lines(raw.as_bytes(), &mut cleaned, Utf8Path::new("processed.nt"))?;
/// assert_eq!(String::from_utf8(cleaned)?, "<a> <b> <c> .\n<d> <e> <f> .\n");
/// assert_eq!(report.lines_dropped, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn sanitise_lines<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    destination: &Utf8Path,
) -> Result<SanitiseReport, SanitiseError> {
    let mut report = SanitiseReport::default();
    for line in reader.lines() {
        report.lines_read += 1;
        let line = line.map_err(|source| SanitiseError::ReadLine {
            source,
            line: report.lines_read,
        })?;
        if line.contains(MALFORMED_MARKER) {
            debug!("dropping malformed line {}", report.lines_read);
            report.lines_dropped += 1;
            continue;
        }
        writeln!(writer, "{}", line.trim()).map_err(|source| SanitiseError::Write {
            source,
            path: destination.to_owned(),
        })?;
        report.lines_kept += 1;
    }
    Ok(report)
}

/// Produce the cleaned dump at `destination` from the raw dump at `source`.
///
/// Skips all work when `destination` already exists. The cleaned dump is
/// staged and renamed into place only once complete, so an interrupted run
/// never leaves a partial file that a later run would reuse.
pub fn sanitise_dump(
    source: &Utf8Path,
    destination: &Utf8Path,
) -> Result<StageOutcome<SanitiseReport>, SanitiseError> {
    let write_error = |err| SanitiseError::Write {
        source: err,
        path: destination.to_owned(),
    };
    if path_exists(destination).map_err(write_error)? {
        info!("cleaned dump already present at {destination}; skipping sanitiser");
        return Ok(StageOutcome::Reused(destination.to_owned()));
    }

    info!("removing malformed lines from {source} into {destination}");
    let input = open_utf8_file(source).map_err(|err| SanitiseError::Open {
        source: err,
        path: source.to_owned(),
    })?;
    let mut output = AtomicFile::create(destination).map_err(write_error)?;
    let report = sanitise_lines(BufReader::new(input), &mut output, destination)?;
    output.commit().map_err(write_error)?;

    info!(
        "kept {} of {} lines ({} malformed)",
        report.lines_kept, report.lines_read, report.lines_dropped
    );
    Ok(StageOutcome::Produced(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::{fs, io};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        (dir, root)
    }

    fn run(input: &str) -> (String, SanitiseReport) {
        let mut output = Vec::new();
        let report = sanitise_lines(input.as_bytes(), &mut output, Utf8Path::new("out.nt"))
            .expect("sanitise in memory");
        (String::from_utf8(output).expect("utf-8 output"), report)
    }

    #[rstest]
    fn drops_null_lines_and_preserves_order() {
        let (output, report) = run("<a> <b> <c> .\n<a> <b> <null> .\n<d> <e> <f> .\n");
        assert_eq!(output, "<a> <b> <c> .\n<d> <e> <f> .\n");
        assert_eq!(
            report,
            SanitiseReport {
                lines_read: 3,
                lines_kept: 2,
                lines_dropped: 1,
            }
        );
    }

    #[rstest]
    #[case("  <a> <b> <c> .  \n", "<a> <b> <c> .\n")]
    #[case("<a> <b> <c> .\r\n", "<a> <b> <c> .\n")]
    #[case("\t<a> <b> \"x y\" .", "<a> <b> \"x y\" .\n")]
    #[case("   \n", "\n")]
    fn trims_surrounding_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(run(input).0, expected);
    }

    #[rstest]
    #[case("<null> <b> <c> .\n")]
    #[case("<a> <null> <c> .\n")]
    #[case("<a> <b> \"text mentioning <null>\" .\n")]
    fn marker_anywhere_drops_line(#[case] input: &str) {
        let (output, report) = run(input);
        assert!(output.is_empty());
        assert_eq!(report.lines_dropped, 1);
    }

    #[rstest]
    fn bare_carriage_return_does_not_split_lines() {
        let (output, report) = run("<a> <b> <c> .\r<null> <b> <c> .\n<d> <e> <f> .\n");
        assert_eq!(output, "<d> <e> <f> .\n");
        assert_eq!(report.lines_read, 2);
        assert_eq!(report.lines_dropped, 1);
    }

    #[rstest]
    fn empty_input_yields_empty_output() {
        let (output, report) = run("");
        assert!(output.is_empty());
        assert_eq!(report, SanitiseReport::default());
    }

    #[rstest]
    fn reports_line_of_invalid_utf8() {
        let input: &[u8] = b"<a> <b> <c> .\n\xff\xfe\n";
        let error = sanitise_lines(input, io::sink(), Utf8Path::new("out.nt"))
            .expect_err("invalid UTF-8 should fail");
        assert!(matches!(error, SanitiseError::ReadLine { line: 2, .. }));
    }

    #[rstest]
    fn sanitises_file_once(#[from(workspace)] (_dir, root): (TempDir, Utf8PathBuf)) {
        let raw = root.join("raw.nt");
        let cleaned = root.join("processed.nt");
        fs::write(&raw, "<a> <b> <c> .\n<a> <b> <null> .\n").expect("write raw dump");

        let first = sanitise_dump(&raw, &cleaned).expect("sanitise dump");
        assert_eq!(first.produced().map(|report| report.lines_kept), Some(1));
        assert_eq!(fs::read_to_string(&cleaned).expect("read"), "<a> <b> <c> .\n");

        fs::write(&raw, "<x> <y> <z> .\n").expect("rewrite raw dump");
        let second = sanitise_dump(&raw, &cleaned).expect("skip sanitiser");
        assert_eq!(second, StageOutcome::Reused(cleaned.clone()));
        assert_eq!(fs::read_to_string(&cleaned).expect("read"), "<a> <b> <c> .\n");
    }

    #[rstest]
    fn missing_raw_dump_is_reported(#[from(workspace)] (_dir, root): (TempDir, Utf8PathBuf)) {
        let raw = root.join("raw.nt");
        let cleaned = root.join("processed.nt");
        let error = sanitise_dump(&raw, &cleaned).expect_err("missing raw dump should fail");
        assert!(matches!(error, SanitiseError::Open { ref path, .. } if *path == raw));
        assert!(!cleaned.exists());
    }

    #[rstest]
    fn failed_read_leaves_no_cleaned_dump(
        #[from(workspace)] (_dir, root): (TempDir, Utf8PathBuf),
    ) {
        let raw = root.join("raw.nt");
        let cleaned = root.join("processed.nt");
        fs::write(&raw, b"<a> <b> <c> .\n\xff\n").expect("write raw dump");
        sanitise_dump(&raw, &cleaned).expect_err("invalid UTF-8 should fail");
        assert!(!cleaned.exists());
    }
}
