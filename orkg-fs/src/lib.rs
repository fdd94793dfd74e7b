//! Shared filesystem helpers built on `cap-std` and `camino`.
//!
//! Every pipeline artefact is produced through [`AtomicFile`], which writes
//! to a hidden staging file beside the target and renames it into place only
//! once the content is complete. A file present at an artefact path is
//! therefore always a finished one.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, BufWriter, Write};
use std::path::Component;

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Resolve an ambient directory for the given path and return the directory with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether anything exists at `path`.
///
/// A missing parent directory reports `false` rather than an error.
pub fn path_exists(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Ensure the parent directory for `path` exists, handling absolute paths safely for cap-std.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    ensure_dir(parent)
}

/// Create `path` and any missing ancestors.
///
/// Fails with [`io::ErrorKind::AlreadyExists`] when `path` exists but is not
/// a directory.
pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
    if path.as_str().is_empty() || path == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(path)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    match base_dir.metadata(&relative) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{path} exists but is not a directory"),
        )),
        Err(err) if err.kind() == io::ErrorKind::NotFound => base_dir.create_dir_all(&relative),
        Err(err) => Err(err),
    }
}

/// Split an absolute or relative path into an ambient base directory and a relative suffix.
pub fn base_dir_and_relative(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();

    let (base, relative) = match std_path.components().next() {
        // Windows absolute path with a drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;

            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_path
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_path.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from path"))?
                .to_path_buf();
            (base, relative)
        }
        // Unix-style absolute path.
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_path
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        // Relative path: resolve from the current directory.
        _ => (Utf8PathBuf::from("."), std_path.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative =
        Utf8PathBuf::from_path_buf(relative).map_err(|_| io::Error::other("non-UTF-8 path"))?;

    Ok((dir, relative))
}

/// Name of the staging file used while `file_name` is being written.
#[must_use]
pub fn staging_name(file_name: &str) -> String {
    format!(".{file_name}.partial")
}

/// A buffered file that only appears at its target path once committed.
///
/// Bytes go to a staging file in the target's directory. [`AtomicFile::commit`]
/// flushes, syncs and renames the staging file over the target. Dropping an
/// uncommitted file removes the staging file on a best-effort basis.
///
/// # Examples
/// ```
/// use std::io::Write;
/// use camino::Utf8PathBuf;
/// use orkg_fs::AtomicFile;
///
/// # fn main() -> std::io::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let target = Utf8PathBuf::from_path_buf(dir.path().join("rows.tsv"))
///     .map_err(|_| std::io::Error::other("non-UTF-8 temp dir"))?;
/// let mut file = AtomicFile::create(&target)?;
/// file.write_all(b"a\tb\tc\n")?;
/// assert!(!target.exists());
/// file.commit()?;
/// assert_eq!(std::fs::read_to_string(&target)?, "a\tb\tc\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AtomicFile {
    dir: fs_utf8::Dir,
    target: String,
    staging: String,
    writer: Option<BufWriter<fs_utf8::File>>,
    pending: bool,
}

impl AtomicFile {
    /// Start writing a new version of `path`, creating parent directories.
    pub fn create(path: &Utf8Path) -> io::Result<Self> {
        ensure_parent_dir(path)?;
        let (dir, target) = open_dir_and_file(path)?;
        let staging = staging_name(&target);
        let file = dir.create(staging.as_str())?;
        Ok(Self {
            dir,
            target,
            staging,
            writer: Some(BufWriter::new(file)),
            pending: true,
        })
    }

    /// Flush the content to disk and move it to the target path.
    pub fn commit(mut self) -> io::Result<()> {
        let writer = self.writer.take().ok_or_else(closed)?;
        let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()?;
        drop(file);
        self.dir
            .rename(self.staging.as_str(), &self.dir, self.target.as_str())?;
        self.pending = false;
        Ok(())
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<fs_utf8::File>> {
        self.writer.as_mut().ok_or_else(closed)
    }
}

fn closed() -> io::Error {
    io::Error::other("staging file already closed")
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if self.pending {
            drop(self.writer.take());
            // Nothing useful can be done if the cleanup itself fails.
            self.dir.remove_file(self.staging.as_str()).ok();
        }
    }
}
