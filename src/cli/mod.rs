//! Demo command line
//!
//! Picks a log level and the two formatting toggles, then fires one of two
//! fixed requests (one that succeeds, one that fails) and logs the exchange
//! to standard output.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command};
use reqwest::{ClientBuilder, Method};

use crate::config::{LogLevel, LogOption, LogOptions, LoggerConfig, LEVEL_ENV};
use crate::error::{ActivityLoggerError, Result};
use crate::exit_code::exit_code_for_error;
use crate::http::RequestBuilderExt;
use crate::logger::{ActivityLogger, LogExt};
use crate::printer::LogPrinter;
use crate::utils::{FileUtils, StringUtils, UrlUtils};

/// Endpoint answering `200` with a small JSON body.
pub const SUCCESS_URL: &str = "http://www.mocky.io/v2/574c43dc100000760eed69ca";
/// Endpoint answering with an error status.
pub const FAILURE_URL: &str = "http://www.mocky.io/v2/574c440d100000860eed69cb";

/// Everything one demo run needs.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub url: String,
    pub method: Method,
    /// In command line order; repeated names are all sent
    pub headers: Vec<(String, String)>,
    pub data: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout: Duration,
    pub logger: LoggerConfig,
    /// Send blocks through the `log` facade instead of stdout
    pub to_log: bool,
}

/// Main entry point for the CLI application
pub fn run() {
    crate::logging::init();

    let matches = create_app().get_matches();

    if let Err(e) = run_with_args(&matches) {
        eprintln!("activity-logger: error: {}", e);
        std::process::exit(exit_code_for_error(&e));
    }
}

/// Run the demo with parsed command line arguments
fn run_with_args(matches: &ArgMatches) -> Result<()> {
    let config = build_config_from_args(matches)?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        ActivityLoggerError::Config(format!("Failed to create async runtime: {}", e))
    })?;

    rt.block_on(perform_request(config))
}

/// Fire the configured request with logging attached.
///
/// Responses outside `200..300` count as failures.
pub async fn perform_request(config: DemoConfig) -> Result<()> {
    let client = ClientBuilder::new().timeout(config.timeout).build()?;
    let logger = if config.to_log {
        ActivityLogger::new(config.logger, LogPrinter)
    } else {
        ActivityLogger::stdout(config.logger)
    };

    let mut request = client.request(config.method, &config.url);
    for (key, value) in &config.headers {
        request = request.header(key, value);
    }
    if let Some(data) = config.data {
        request = request.body(data);
    }

    match config.output {
        Some(destination) => {
            let download = request.download_request(destination)?.validate();
            let response = download.log(&logger).await?;
            log::debug!(
                "Saved {} bytes to {}",
                response.bytes_written,
                response.destination.display()
            );
        }
        None => {
            let response = request.data_request()?.validate().log(&logger).await?;
            log::debug!("Received {} bytes", response.body.len());
        }
    }
    Ok(())
}

/// Create the CLI application structure
pub fn create_app() -> Command {
    Command::new("activity-logger")
        .version(crate::VERSION)
        .about("Fire a test request and print its request/response log")
        .arg(
            Arg::new("target")
                .help("Which test request to fire")
                .value_parser(["success", "failure"])
                .default_value("success")
                .index(1),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .value_name("LEVEL")
                .help("Log level: none, all, info or error")
                .env(LEVEL_ENV)
                .default_value("all"),
        )
        .arg(
            Arg::new("no-pretty-print")
                .long("no-pretty-print")
                .help("Print JSON bodies as received")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-separator")
                .long("no-separator")
                .help("Do not bracket log blocks with a separator")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("only-debug")
                .long("only-debug")
                .help("Only log when built in debug mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("to-log")
                .long("to-log")
                .help("Write log blocks to stderr through the logger instead of stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("success-url")
                .long("success-url")
                .value_name("URL")
                .help("URL fired by the success request")
                .env("ACTIVITY_LOGGER_SUCCESS_URL")
                .default_value(SUCCESS_URL),
        )
        .arg(
            Arg::new("failure-url")
                .long("failure-url")
                .value_name("URL")
                .help("URL fired by the failure request")
                .env("ACTIVITY_LOGGER_FAILURE_URL")
                .default_value(FAILURE_URL),
        )
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .help("Fire this URL instead of a test request"),
        )
        .arg(
            Arg::new("request")
                .short('X')
                .long("request")
                .value_name("METHOD")
                .help("HTTP request method")
                .default_value("GET"),
        )
        .arg(
            Arg::new("header")
                .short('H')
                .long("header")
                .value_name("HEADER")
                .help("Add custom HTTP header")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .value_name("DATA")
                .help("HTTP request body"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Download the response body to a file"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help("Maximum time for the request")
                .default_value("60"),
        )
}

/// Build configuration from command line arguments
pub fn build_config_from_args(matches: &ArgMatches) -> Result<DemoConfig> {
    let target_url = match matches.get_one::<String>("url") {
        Some(url) => url,
        None if is_failure_target(matches) => required(matches, "failure-url")?,
        None => required(matches, "success-url")?,
    };
    let url = UrlUtils::validate_url(target_url)?.to_string();

    let method_str = required(matches, "request")?;
    let method = Method::from_bytes(method_str.to_uppercase().as_bytes())
        .map_err(|_| ActivityLoggerError::Config(format!("Unknown HTTP method: {}", method_str)))?;

    let headers = matches
        .get_many::<String>("header")
        .into_iter()
        .flatten()
        .map(|header_str| StringUtils::parse_header(header_str))
        .collect::<Result<Vec<_>>>()?;

    let output = matches
        .get_one::<String>("output")
        .map(|path| FileUtils::expand_path(path))
        .transpose()?;

    let timeout = StringUtils::parse_timeout(required(matches, "timeout")?)?;

    Ok(DemoConfig {
        url,
        method,
        headers,
        data: matches.get_one::<String>("data").cloned(),
        output,
        timeout,
        logger: logger_config_from_args(matches)?,
        to_log: matches.get_flag("to-log"),
    })
}

/// Map the level picker and the toggles onto a [`LoggerConfig`].
fn logger_config_from_args(matches: &ArgMatches) -> Result<LoggerConfig> {
    let level: LogLevel = required(matches, "level")?.parse()?;

    let mut options = LogOptions::empty();
    if !matches.get_flag("no-pretty-print") {
        options.insert(LogOption::JsonPrettyPrint);
    }
    if !matches.get_flag("no-separator") {
        options.insert(LogOption::IncludeSeparator);
    }
    if matches.get_flag("only-debug") {
        options.insert(LogOption::OnlyDebug);
    }

    Ok(LoggerConfig::new(level, options).with_debug_build(cfg!(debug_assertions)))
}

fn is_failure_target(matches: &ArgMatches) -> bool {
    matches
        .get_one::<String>("target")
        .is_some_and(|target| target == "failure")
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| ActivityLoggerError::Config(format!("Missing argument: {}", name)))
}
