//! HTTP request adapters
//!
//! Anything that can be logged implements [`LoggableRequest`]: it hands out
//! a snapshot of the outgoing request and, once, performs the call and
//! reports what came back. [`DataRequest`] buffers the response body in
//! memory; [`DownloadRequest`] streams it to a file.

use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

use crate::capture::{RequestSnapshot, ResponseInfo};
use crate::error::Result;

pub mod download;
pub mod request;
pub mod response;

pub use download::DownloadRequest;
pub use request::DataRequest;
pub use response::{DataResponse, DownloadResponse};

/// A request whose exchange can be logged.
pub trait LoggableRequest: Sized {
    /// What the caller gets back once the call has finished.
    type Output;

    /// The request as it is about to be sent, if there is one.
    fn request(&self) -> Option<RequestSnapshot>;

    /// Perform the call and complete exactly once with the caller's output and
    /// the captured response. `started` is the dispatch instant; elapsed time
    /// is measured from it. The response body is only captured when
    /// `capture_body` is set.
    fn fetch_response_info(
        self,
        started: Instant,
        capture_body: bool,
    ) -> impl Future<Output = (Self::Output, ResponseInfo)> + Send;
}

/// Turn a `reqwest::RequestBuilder` into a loggable request.
pub trait RequestBuilderExt {
    fn data_request(self) -> Result<DataRequest>;

    fn download_request(self, destination: impl Into<PathBuf>) -> Result<DownloadRequest>;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn data_request(self) -> Result<DataRequest> {
        let (client, request) = self.build_split();
        Ok(DataRequest::new(client, request?))
    }

    fn download_request(self, destination: impl Into<PathBuf>) -> Result<DownloadRequest> {
        let (client, request) = self.build_split();
        Ok(DownloadRequest::new(client, request?, destination))
    }
}
