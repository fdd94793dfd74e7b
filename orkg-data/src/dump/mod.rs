//! Facilities for downloading the ORKG dump.
#![forbid(unsafe_code)]

mod error;
mod ops;
mod source;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
#[cfg(any(test, feature = "test-support"))]
pub use test_support::{StubSource, block_on_for_tests};

pub use error::{DumpError, TransportError};
pub use ops::fetch_dump;
pub use source::{DEFAULT_USER_AGENT, DumpSource, HttpDumpSource};
pub use types::{DEFAULT_DUMP_URL, DownloadReport, DumpUrl};
