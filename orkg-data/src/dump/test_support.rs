//! Shared fixtures for dump tests.
use std::{cell::Cell, future::Future, io::Write};

use async_trait::async_trait;
use tokio::runtime::Builder;

use super::{DumpSource, DumpUrl, TransportError};

/// Stub [`DumpSource`] serving in-memory bytes and counting requests.
#[derive(Debug, Clone)]
pub struct StubSource {
    body: Vec<u8>,
    failure_status: Option<u16>,
    requests: Cell<usize>,
}

impl StubSource {
    /// Serve `body` for every request.
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            body,
            failure_status: None,
            requests: Cell::new(0),
        }
    }

    /// Answer every request with an HTTP error `status` after writing part of
    /// the body, mimicking a transfer that breaks off midway.
    pub fn failing(body: Vec<u8>, status: u16) -> Self {
        Self {
            failure_status: Some(status),
            ..Self::new(body)
        }
    }

    /// Number of downloads attempted so far.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

#[async_trait(?Send)]
impl DumpSource for StubSource {
    async fn download(&self, url: &DumpUrl, sink: &mut dyn Write) -> Result<u64, TransportError> {
        self.requests.set(self.requests.get() + 1);
        let sink_error = |source| TransportError::Sink {
            url: url.to_string(),
            source,
        };
        if let Some(status) = self.failure_status {
            let half = self.body.len() / 2;
            sink.write_all(self.body.get(..half).unwrap_or_default())
                .map_err(sink_error)?;
            return Err(TransportError::Http {
                url: url.to_string(),
                status,
                message: "stubbed failure".to_owned(),
            });
        }
        sink.write_all(&self.body).map_err(sink_error)?;
        let length = u64::try_from(self.body.len()).expect("body length should fit in u64");
        Ok(length)
    }
}

/// Drive `future` to completion on a fresh current-thread runtime.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build Tokio runtime")
        .block_on(future)
}
