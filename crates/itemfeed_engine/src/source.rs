use std::time::Duration;

use futures_util::StreamExt;
use itemfeed_core::Record;
use itemfeed_logging::feed_debug;

use crate::decode::decode_records;
use crate::{NetworkFailure, SourceError};

pub const DEFAULT_ENDPOINT: &str = "https://fetch-hiring.s3.amazonaws.com/hiring.json";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Produces the raw record collection, one request per call.
#[async_trait::async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError>;
}

/// Fetches the collection with a single GET against `FetchSettings::endpoint`.
#[derive(Debug, Clone)]
pub struct ReqwestSource {
    settings: FetchSettings,
}

impl ReqwestSource {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, SourceError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(
                self.settings.redirect_limit,
            ))
            .build()
            .map_err(|err| SourceError::network(NetworkFailure::Connection, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> SourceError {
        SourceError::network(
            NetworkFailure::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }

    async fn download(&self) -> Result<Vec<u8>, SourceError> {
        let url = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| SourceError::network(NetworkFailure::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::network(
                NetworkFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RemoteSource for ReqwestSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        let bytes = self.download().await?;
        feed_debug!(
            "Downloaded {} bytes from {}",
            bytes.len(),
            self.settings.endpoint
        );
        decode_records(&bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        return SourceError::network(NetworkFailure::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return SourceError::network(NetworkFailure::RedirectLimitExceeded, err.to_string());
    }
    SourceError::network(NetworkFailure::Connection, err.to_string())
}
