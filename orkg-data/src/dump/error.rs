//! Error types produced by the dump fetcher.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced while downloading the dump to disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DumpError {
    /// Checking for an existing dump failed.
    #[error("failed to inspect {path}: {source}")]
    Inspect { source: io::Error, path: Utf8PathBuf },
    /// The staging file for the download could not be created.
    #[error("failed to prepare {path} for writing: {source}")]
    Stage { source: io::Error, path: Utf8PathBuf },
    /// The dump could not be downloaded.
    #[error("failed to download dump: {source}")]
    Download { source: super::TransportError },
    /// Moving the finished download into place failed.
    #[error("failed to write dump to {path}: {source}")]
    Commit { source: io::Error, path: Utf8PathBuf },
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// Error reported by the client builder.
        source: reqwest::Error,
    },
    /// The server returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description supplied by the server.
        message: String,
    },
    /// The request failed due to an I/O error.
    #[error("network error contacting {url}: {source}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the transport.
        source: io::Error,
    },
    /// The response body could not be written to the sink.
    #[error("failed to store response from {url}: {source}")]
    Sink {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the sink.
        source: io::Error,
    },
}
