//! Streaming-to-disk request adapter

use std::path::{Path, PathBuf};
use std::time::Instant;

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::response::DownloadResponse;
use super::LoggableRequest;
use crate::capture::{RequestSnapshot, ResponseHead, ResponseInfo};
use crate::error::{ActivityLoggerError, Result};

/// A request whose response body is streamed into a file.
///
/// The logged body is the downloaded file's content, only on success and
/// only when the logger prints bodies.
#[derive(Debug)]
pub struct DownloadRequest {
    client: Client,
    request: reqwest::Request,
    destination: PathBuf,
    validate: bool,
}

impl DownloadRequest {
    pub fn new(client: Client, request: reqwest::Request, destination: impl Into<PathBuf>) -> Self {
        Self {
            client,
            request,
            destination: destination.into(),
            validate: false,
        }
    }

    /// Treat any status outside `200..300` as a failure; nothing is written.
    pub fn validate(mut self) -> Self {
        self.validate = true;
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Send without logging. The file is not read back.
    pub async fn send(self) -> Result<DownloadResponse> {
        self.fetch_response_info(Instant::now(), false).await.0
    }
}

impl LoggableRequest for DownloadRequest {
    type Output = Result<DownloadResponse>;

    fn request(&self) -> Option<RequestSnapshot> {
        Some(RequestSnapshot::from(&self.request))
    }

    async fn fetch_response_info(
        self,
        started: Instant,
        capture_body: bool,
    ) -> (Self::Output, ResponseInfo) {
        let response = match self.client.execute(self.request).await {
            Ok(response) => response,
            Err(e) => {
                let info = ResponseInfo::failure(&e, started.elapsed());
                return (Err(ActivityLoggerError::Http(e)), info);
            }
        };

        let head = ResponseHead::from(&response);
        let failed = |err: ActivityLoggerError, head: ResponseHead| -> (Self::Output, ResponseInfo) {
            let info = ResponseInfo {
                head: Some(head),
                body: None,
                error: Some(err.to_string()),
                elapsed: started.elapsed(),
            };
            (Err(err), info)
        };

        let status = response.status();
        if self.validate && !status.is_success() {
            return failed(ActivityLoggerError::Status(status.as_u16()), head);
        }

        let url = response.url().clone();
        let headers = response.headers().clone();
        let bytes_written = match write_body(response, &self.destination).await {
            Ok(written) => written,
            Err(e) => {
                remove_partial(&self.destination).await;
                return failed(e, head);
            }
        };

        let body = if capture_body {
            read_back(&self.destination).await
        } else {
            None
        };

        let output = DownloadResponse {
            url,
            status,
            headers,
            destination: self.destination,
            bytes_written,
        };
        (
            Ok(output),
            ResponseInfo::success(head, body, started.elapsed()),
        )
    }
}

/// The downloaded content for the log. The download itself already
/// succeeded, so a failed read only drops the body.
async fn read_back(destination: &Path) -> Option<Bytes> {
    match tokio::fs::read(destination).await {
        Ok(content) => Some(Bytes::from(content)),
        Err(e) => {
            log::debug!("Could not read back {}: {}", destination.display(), e);
            None
        }
    }
}

async fn remove_partial(destination: &Path) {
    match tokio::fs::remove_file(destination).await {
        Ok(()) => log::debug!("Removed partial download {}", destination.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::debug!("Could not remove {}: {}", destination.display(), e),
    }
}

async fn write_body(response: reqwest::Response, destination: &Path) -> Result<u64> {
    let mut file = File::create(destination).await?;
    let mut stream = std::pin::pin!(response.bytes_stream());
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    log::debug!("Wrote {} bytes to {}", written, destination.display());
    Ok(written)
}
