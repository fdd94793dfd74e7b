//! Typed wrappers for dump endpoints and download results.

use std::{fmt, ops::Deref};

use camino::Utf8PathBuf;
use url::Url;

/// Default location of the ORKG N-Triples dump.
pub const DEFAULT_DUMP_URL: &str = "https://orkg.org/orkg/api/rdf/dump";

/// Fully qualified URL pointing to a dump artefact.
///
/// # Examples
/// ```
/// # use orkg_data::dump::DumpUrl;
/// let url = DumpUrl::try_from("https://orkg.org/orkg/api/rdf/dump")?;
/// assert!(url.as_ref().starts_with("https://"));
/// # Ok::<(), url::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpUrl(String);

impl DumpUrl {
    /// Wrap `value` without validating it.
    ///
    /// Prefer [`DumpUrl::try_from`] for user-supplied input.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Default for DumpUrl {
    fn default() -> Self {
        Self::new(DEFAULT_DUMP_URL)
    }
}

impl AsRef<str> for DumpUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for DumpUrl {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for DumpUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Url> for DumpUrl {
    fn from(value: Url) -> Self {
        Self(value.into())
    }
}

impl TryFrom<&str> for DumpUrl {
    type Error = url::ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value).map(Into::into)
    }
}

/// Summary of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// Source of the downloaded bytes.
    pub url: DumpUrl,
    /// Number of bytes written to disk.
    pub bytes_written: u64,
    /// Final location of the dump.
    pub output_path: Utf8PathBuf,
}
