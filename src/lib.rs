//! activity-logger - human-readable request/response logging for reqwest
//!
//! Wrap a request in a [`DataRequest`] or [`DownloadRequest`], hand it to an
//! [`ActivityLogger`], and the method, URL, headers, body, status code and
//! elapsed time of the exchange are printed according to a [`LogLevel`] and a
//! set of [`LogOptions`].

pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod format;
pub mod http;
pub mod logger;
pub mod logging;
pub mod printer;
pub mod utils;

pub use capture::{CapturedExchange, RequestSnapshot, ResponseHead, ResponseInfo};
pub use config::{LogLevel, LogOption, LogOptions, LoggerConfig};
pub use error::{ActivityLoggerError, Result};
pub use http::{
    DataRequest, DataResponse, DownloadRequest, DownloadResponse, LoggableRequest,
    RequestBuilderExt,
};
pub use logger::{ActivityLogger, LogExt};
pub use printer::{LogPrinter, Phase, Printer, StdoutPrinter};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
