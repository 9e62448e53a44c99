//! In-memory request adapter

use std::time::Instant;

use reqwest::Client;

use super::response::DataResponse;
use super::LoggableRequest;
use crate::capture::{RequestSnapshot, ResponseHead, ResponseInfo};
use crate::error::{ActivityLoggerError, Result};

/// A request whose whole response body is read into memory.
#[derive(Debug)]
pub struct DataRequest {
    client: Client,
    request: reqwest::Request,
    validate: bool,
}

impl DataRequest {
    pub fn new(client: Client, request: reqwest::Request) -> Self {
        Self {
            client,
            request,
            validate: false,
        }
    }

    /// Treat any status outside `200..300` as a failure.
    pub fn validate(mut self) -> Self {
        self.validate = true;
        self
    }

    pub fn inner(&self) -> &reqwest::Request {
        &self.request
    }

    /// Send without logging.
    pub async fn send(self) -> Result<DataResponse> {
        self.fetch_response_info(Instant::now(), false).await.0
    }
}

impl LoggableRequest for DataRequest {
    type Output = Result<DataResponse>;

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
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let info = ResponseInfo {
                    head: Some(head),
                    body: None,
                    error: Some(e.to_string()),
                    elapsed: started.elapsed(),
                };
                return (Err(ActivityLoggerError::Http(e)), info);
            }
        };

        let logged_body = capture_body.then(|| body.clone());
        let mut info = ResponseInfo::success(head, logged_body, started.elapsed());
        if self.validate && !status.is_success() {
            let err = ActivityLoggerError::Status(status.as_u16());
            info.error = Some(err.to_string());
            return (Err(err), info);
        }

        let output = DataResponse {
            url,
            status,
            headers,
            body,
        };
        (Ok(output), info)
    }
}
