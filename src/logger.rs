//! The logging decorator

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::capture::{CapturedExchange, RequestSnapshot};
use crate::config::{LogLevel, LoggerConfig};
use crate::format::{format_request, format_response};
use crate::http::LoggableRequest;
use crate::printer::{Phase, Printer, StdoutPrinter};

/// Logs requests and responses according to a [`LoggerConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use activity_logger::{ActivityLogger, LoggerConfig, LogExt, RequestBuilderExt};
///
/// # #[tokio::main]
/// # async fn main() -> activity_logger::Result<()> {
/// let logger = ActivityLogger::stdout(LoggerConfig::default());
/// let response = reqwest::Client::new()
///     .get("https://example.test/ok")
///     .data_request()?
///     .validate()
///     .log(&logger)
///     .await?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ActivityLogger {
    config: LoggerConfig,
    printer: Arc<dyn Printer>,
}

impl fmt::Debug for ActivityLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityLogger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ActivityLogger {
    pub fn new(config: LoggerConfig, printer: impl Printer + 'static) -> Self {
        Self {
            config,
            printer: Arc::new(printer),
        }
    }

    /// A logger printing to standard output.
    pub fn stdout(config: LoggerConfig) -> Self {
        Self::new(config, StdoutPrinter)
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Log the whole exchange of `request` and return its output unchanged.
    ///
    /// The request block is printed before the call is made; the response
    /// block once it has finished. If the returned future is dropped first,
    /// no response block is printed.
    pub async fn log<R: LoggableRequest>(&self, request: R) -> R::Output {
        if !self.config.is_enabled() {
            let (output, _) = request.fetch_response_info(Instant::now(), false).await;
            return output;
        }

        let snapshot = request.request();
        let started = self.emit_request(snapshot.as_ref());
        let capture_body = self.config.level == LogLevel::All;
        let (output, response) = request.fetch_response_info(started, capture_body).await;

        log::debug!(
            "Request to {} completed in {:?}",
            snapshot
                .as_ref()
                .and_then(|s| s.url.as_deref())
                .unwrap_or("(unknown)"),
            response.elapsed
        );
        self.emit_response(&CapturedExchange::new(snapshot, response));
        output
    }

    /// Print the request block (if any) and return the dispatch instant to
    /// measure the response against.
    pub fn log_request(&self, request: Option<&RequestSnapshot>) -> Instant {
        if !self.config.is_enabled() {
            return Instant::now();
        }
        self.emit_request(request)
    }

    /// Print the response block, if the level calls for one.
    pub fn log_response(&self, exchange: &CapturedExchange) {
        if self.config.is_enabled() {
            self.emit_response(exchange);
        }
    }

    fn emit_request(&self, request: Option<&RequestSnapshot>) -> Instant {
        if let Some(request) = request {
            log::debug!("Dispatching {} request", request.method);
            if let Some(text) = format_request(request, self.config.level, self.config.options) {
                self.printer.emit(text, Phase::Request);
            }
        }
        Instant::now()
    }

    fn emit_response(&self, exchange: &CapturedExchange) {
        if let Some(text) = format_response(exchange, self.config.level, self.config.options) {
            let phase = Phase::Response {
                success: exchange.is_success(),
            };
            self.printer.emit(text, phase);
        }
    }
}

/// Fluent `.log(&logger)` on any [`LoggableRequest`].
pub trait LogExt: LoggableRequest {
    fn log(self, logger: &ActivityLogger) -> impl Future<Output = Self::Output>;
}

impl<R: LoggableRequest> LogExt for R {
    fn log(self, logger: &ActivityLogger) -> impl Future<Output = Self::Output> {
        logger.log(self)
    }
}
