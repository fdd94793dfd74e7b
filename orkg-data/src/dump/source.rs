use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Response};
use std::{
    io::{self, Write},
    time::Duration,
};

use super::{DumpUrl, TransportError};

pub const DEFAULT_USER_AGENT: &str = "orkg-kge/0.1";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Origin of dump bytes.
#[async_trait(?Send)]
pub trait DumpSource {
    /// Stream the resource identified by `url` into `sink`, returning the
    /// number of bytes written.
    async fn download(&self, url: &DumpUrl, sink: &mut dyn Write) -> Result<u64, TransportError>;
}

/// HTTP implementation of [`DumpSource`].
#[derive(Debug)]
pub struct HttpDumpSource {
    client: Client,
    user_agent: String,
}

impl HttpDumpSource {
    /// Construct an HTTP-backed dump source with the default user agent.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|source| TransportError::Client { source })?;
        Ok(Self {
            client,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Override the default user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    async fn call(&self, url: &str) -> Result<Response, TransportError> {
        self.client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(err, url))
    }
}

#[async_trait(?Send)]
impl DumpSource for HttpDumpSource {
    async fn download(&self, url: &DumpUrl, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let mut response = self.call(url).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
        {
            sink.write_all(&chunk)
                .map_err(|source| TransportError::Sink {
                    url: url.to_string(),
                    source,
                })?;
            written = written.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        }
        sink.flush().map_err(|source| TransportError::Sink {
            url: url.to_string(),
            source,
        })?;
        Ok(written)
    }
}

fn convert_reqwest_error(error: reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::Other
    };
    TransportError::Network {
        url: url.to_owned(),
        source: io::Error::new(kind, error),
    }
}
