//! What the adapters hand back to the caller

use std::path::PathBuf;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Result;

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct DataResponse {
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl DataResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// A response whose body was written to disk.
#[derive(Debug, Clone)]
pub struct DownloadResponse {
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub destination: PathBuf,
    pub bytes_written: u64,
}
