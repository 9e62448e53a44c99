//! Snapshots of the interesting parts of a request and its outcome

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;

/// Header name to value. Repeated headers are joined with `", "`.
pub type Headers = BTreeMap<String, String>;

/// The outgoing request, captured right before it is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub method: String,
    pub url: Option<String>,
    pub headers: Option<Headers>,
    pub body: Option<Bytes>,
}

impl RequestSnapshot {
    pub fn new(method: impl Into<String>, url: Option<String>) -> Self {
        RequestSnapshot {
            method: method.into(),
            url,
            headers: None,
            body: None,
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl From<&reqwest::Request> for RequestSnapshot {
    fn from(request: &reqwest::Request) -> Self {
        RequestSnapshot {
            method: request.method().to_string(),
            url: Some(request.url().to_string()),
            headers: Some(headers_from_map(request.headers())),
            // Streaming bodies cannot be read without consuming them.
            body: request
                .body()
                .and_then(|body| body.as_bytes())
                .map(Bytes::copy_from_slice),
        }
    }
}

/// Status line and headers of a received HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub headers: Headers,
}

impl From<&reqwest::Response> for ResponseHead {
    fn from(response: &reqwest::Response) -> Self {
        ResponseHead {
            status: response.status().as_u16(),
            headers: headers_from_map(response.headers()),
        }
    }
}

/// What the call produced once it finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseInfo {
    /// Absent when no HTTP response was received at all
    pub head: Option<ResponseHead>,
    pub body: Option<Bytes>,
    /// Failure description; its presence alone marks the exchange as failed
    pub error: Option<String>,
    /// Time from dispatch to completion
    pub elapsed: Duration,
}

impl ResponseInfo {
    pub fn success(head: ResponseHead, body: Option<Bytes>, elapsed: Duration) -> Self {
        ResponseInfo {
            head: Some(head),
            body,
            error: None,
            elapsed,
        }
    }

    pub fn failure(error: impl ToString, elapsed: Duration) -> Self {
        ResponseInfo {
            head: None,
            body: None,
            error: Some(error.to_string()),
            elapsed,
        }
    }
}

/// One request paired with its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedExchange {
    pub request: Option<RequestSnapshot>,
    pub response: ResponseInfo,
}

impl CapturedExchange {
    pub fn new(request: Option<RequestSnapshot>, response: ResponseInfo) -> Self {
        CapturedExchange { request, response }
    }

    /// 0 when no HTTP response was received.
    pub fn status_code(&self) -> u16 {
        self.response.head.as_ref().map_or(0, |head| head.status)
    }

    pub fn is_success(&self) -> bool {
        self.response.error.is_none()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.response.elapsed.as_secs_f64()
    }

    pub fn method(&self) -> Option<&str> {
        self.request.as_ref().map(|request| request.method.as_str())
    }

    pub fn url(&self) -> Option<&str> {
        self.request.as_ref().and_then(|request| request.url.as_deref())
    }
}

/// Flatten a `HeaderMap` into sorted name/value pairs.
pub fn headers_from_map(headers: &HeaderMap) -> Headers {
    let mut result = Headers::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        result
            .entry(name.as_str().to_owned())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn headers_from_map_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("text/html"));
        headers.append("accept", HeaderValue::from_static("application/json"));
        headers.insert("x-test", HeaderValue::from_static("value"));

        let flat = headers_from_map(&headers);
        assert_eq!(flat["accept"], "text/html, application/json");
        assert_eq!(flat["x-test"], "value");
    }

    #[test]
    fn snapshot_reads_buffered_request() {
        let client = reqwest::Client::new();
        let request = client
            .post("https://example.test/items")
            .header("x-test", "value")
            .body("payload")
            .build()
            .expect("request");

        let snapshot = RequestSnapshot::from(&request);
        assert_eq!(snapshot.method, "POST");
        assert_eq!(snapshot.url.as_deref(), Some("https://example.test/items"));
        assert_eq!(
            snapshot.headers.as_ref().and_then(|h| h.get("x-test")).map(String::as_str),
            Some("value")
        );
        assert_eq!(snapshot.body.as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn exchange_defaults_to_zero_status() {
        let exchange = CapturedExchange::new(
            Some(RequestSnapshot::new("GET", None)),
            ResponseInfo::failure("timed out", Duration::from_millis(5)),
        );
        assert_eq!(exchange.status_code(), 0);
        assert!(!exchange.is_success());
        assert_eq!(exchange.method(), Some("GET"));
        assert_eq!(exchange.url(), None);
        assert!(exchange.elapsed_secs() >= 0.0);
    }
}
