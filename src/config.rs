//! Logger configuration: levels, options and the debug-build switch

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ActivityLoggerError, Result};

/// Environment variable holding the log level (`none`, `all`, `info`, `error`).
pub const LEVEL_ENV: &str = "ACTIVITY_LOG_LEVEL";
/// Environment variable holding a comma separated list of log options.
pub const OPTIONS_ENV: &str = "ACTIVITY_LOG_OPTIONS";

/// How much of each exchange gets printed.
///
/// - `None`: nothing.
/// - `All`: method, URL, headers and body for requests; status code, URL,
///   headers, body and elapsed time for responses.
/// - `Info`: method and URL for requests; status code, URL and elapsed time
///   for responses.
/// - `Error`: only failed responses, as method, URL, elapsed time and the
///   error description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    None,
    #[default]
    All,
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::None => "none",
            LogLevel::All => "all",
            LogLevel::Info => "info",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

impl FromStr for LogLevel {
    type Err = ActivityLoggerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "all" => Ok(LogLevel::All),
            "info" => Ok(LogLevel::Info),
            "error" => Ok(LogLevel::Error),
            other => Err(ActivityLoggerError::Config(format!(
                "Unknown log level: '{}'. Expected none, all, info or error",
                other
            ))),
        }
    }
}

/// Formatting switches, each independent of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogOption {
    /// Only log when the application runs as a debug build
    OnlyDebug,
    /// Pretty print bodies that parse as JSON
    JsonPrettyPrint,
    /// Bracket each block with a separator banner
    IncludeSeparator,
}

impl LogOption {
    const ALL: [LogOption; 3] = [
        LogOption::OnlyDebug,
        LogOption::JsonPrettyPrint,
        LogOption::IncludeSeparator,
    ];

    const fn bit(self) -> u8 {
        match self {
            LogOption::OnlyDebug => 1,
            LogOption::JsonPrettyPrint => 1 << 1,
            LogOption::IncludeSeparator => 1 << 2,
        }
    }
}

impl fmt::Display for LogOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let option = match self {
            LogOption::OnlyDebug => "only-debug",
            LogOption::JsonPrettyPrint => "json-pretty-print",
            LogOption::IncludeSeparator => "include-separator",
        };
        write!(f, "{}", option)
    }
}

impl FromStr for LogOption {
    type Err = ActivityLoggerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "only-debug" | "onlydebug" | "debug" => Ok(LogOption::OnlyDebug),
            "json-pretty-print" | "jsonprettyprint" | "pretty" => Ok(LogOption::JsonPrettyPrint),
            "include-separator" | "includeseparator" | "separator" => {
                Ok(LogOption::IncludeSeparator)
            }
            other => Err(ActivityLoggerError::Config(format!(
                "Unknown log option: '{}'",
                other
            ))),
        }
    }
}

/// A set of [`LogOption`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Vec<LogOption>")]
pub struct LogOptions {
    bits: u8,
}

impl LogOptions {
    /// Every option enabled.
    pub const DEFAULT: LogOptions = LogOptions {
        bits: LogOption::OnlyDebug.bit()
            | LogOption::JsonPrettyPrint.bit()
            | LogOption::IncludeSeparator.bit(),
    };

    /// No option enabled.
    pub const fn empty() -> Self {
        LogOptions { bits: 0 }
    }

    pub const fn contains(&self, option: LogOption) -> bool {
        self.bits & option.bit() != 0
    }

    pub fn insert(&mut self, option: LogOption) {
        self.bits |= option.bit();
    }

    pub fn remove(&mut self, option: LogOption) {
        self.bits &= !option.bit();
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, option: LogOption) -> Self {
        self.insert(option);
        self
    }

    /// Builder-style [`remove`](Self::remove).
    pub fn without(mut self, option: LogOption) -> Self {
        self.remove(option);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = LogOption> + '_ {
        LogOption::ALL
            .into_iter()
            .filter(move |option| self.contains(*option))
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        LogOptions::DEFAULT
    }
}

impl fmt::Debug for LogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<LogOption> for LogOptions {
    fn from_iter<I: IntoIterator<Item = LogOption>>(iter: I) -> Self {
        let mut options = LogOptions::empty();
        for option in iter {
            options.insert(option);
        }
        options
    }
}

impl From<Vec<LogOption>> for LogOptions {
    fn from(options: Vec<LogOption>) -> Self {
        options.into_iter().collect()
    }
}

impl<const N: usize> From<[LogOption; N]> for LogOptions {
    fn from(options: [LogOption; N]) -> Self {
        options.into_iter().collect()
    }
}

impl FromStr for LogOptions {
    type Err = ActivityLoggerError;

    /// Parse a comma separated list; an empty string is the empty set.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(LogOption::from_str)
            .collect()
    }
}

/// Everything the logger needs to decide what to print.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub options: LogOptions,
    /// Whether the surrounding application is a debug build. Consulted only
    /// when [`LogOption::OnlyDebug`] is set.
    pub debug_build: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            level: LogLevel::All,
            options: LogOptions::DEFAULT,
            debug_build: cfg!(debug_assertions),
        }
    }
}

impl LoggerConfig {
    pub fn new(level: LogLevel, options: impl Into<LogOptions>) -> Self {
        LoggerConfig {
            level,
            options: options.into(),
            ..LoggerConfig::default()
        }
    }

    pub fn with_debug_build(mut self, debug_build: bool) -> Self {
        self.debug_build = debug_build;
        self
    }

    /// Read level and options from `ACTIVITY_LOG_LEVEL` / `ACTIVITY_LOG_OPTIONS`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LoggerConfig::default();
        if let Some(level) = lookup(LEVEL_ENV) {
            config.level = level.parse()?;
        }
        if let Some(options) = lookup(OPTIONS_ENV) {
            config.options = options.parse()?;
        }
        Ok(config)
    }

    /// False when nothing at all should be printed for this configuration.
    pub fn is_enabled(&self) -> bool {
        if self.level == LogLevel::None {
            return false;
        }
        !(self.options.contains(LogOption::OnlyDebug) && !self.debug_build)
    }
}
