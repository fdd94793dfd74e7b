use camino::Utf8Path;
use log::info;
use orkg_fs::{AtomicFile, path_exists};

use super::source::DumpSource;
use super::{DownloadReport, DumpError, DumpUrl};
use crate::{Progress, StageOutcome};

/// Ensure a local copy of the dump at `url` exists at `output_path`.
///
/// When anything already exists at `output_path` the source is not contacted
/// at all. Otherwise the download streams into a staging file that is renamed
/// into place only after the transfer completes, so a failed or interrupted
/// download never leaves a truncated dump behind.
///
/// # Examples
/// ```
/// # use std::{cell::Cell, io::Write};
/// # use async_trait::async_trait;
/// # use camino::Utf8PathBuf;
/// # use orkg_data::Progress;
/// # use orkg_data::dump::{DumpSource, DumpUrl, TransportError, fetch_dump};
/// struct Counting(Cell<usize>);
///
/// #[async_trait(?Send)]
/// impl DumpSource for Counting {
///     async fn download(&self, _url: &DumpUrl, sink: &mut dyn Write) -> Result<u64, TransportError> {
///         self.0.set(self.0.get() + 1);
///         sink.write_all(b"<a> <b> <c> .\n").expect("write to staging file");
///         Ok(14)
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// let output = Utf8PathBuf::from_path_buf(temp.path().join("raw.nt")).expect("utf-8 path");
/// let source = Counting(Cell::new(0));
/// let url = DumpUrl::default();
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
///
/// let first = runtime.block_on(fetch_dump(&source, &url, &output, Progress::Hidden))?;
/// let second = runtime.block_on(fetch_dump(&source, &url, &output, Progress::Hidden))?;
/// assert!(!first.is_reused());
/// assert!(second.is_reused());
/// assert_eq!(source.0.get(), 1);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_dump<S: DumpSource + ?Sized>(
    source: &S,
    url: &DumpUrl,
    output_path: &Utf8Path,
    progress: Progress,
) -> Result<StageOutcome<DownloadReport>, DumpError> {
    let exists = path_exists(output_path).map_err(|source| DumpError::Inspect {
        source,
        path: output_path.to_owned(),
    })?;
    if exists {
        info!("dump already present at {output_path}; skipping download");
        return Ok(StageOutcome::Reused(output_path.to_owned()));
    }

    info!("downloading {url} to {output_path}");
    let mut file = AtomicFile::create(output_path).map_err(|source| DumpError::Stage {
        source,
        path: output_path.to_owned(),
    })?;
    let bar = progress.bytes("downloading");
    let downloaded = source.download(url, &mut bar.wrap_write(&mut file)).await;
    bar.finish_and_clear();
    let bytes_written = downloaded.map_err(|source| DumpError::Download { source })?;
    file.commit().map_err(|source| DumpError::Commit {
        source,
        path: output_path.to_owned(),
    })?;

    info!("downloaded {bytes_written} bytes to {output_path}");
    Ok(StageOutcome::Produced(DownloadReport {
        url: url.clone(),
        bytes_written,
        output_path: output_path.to_owned(),
    }))
}
