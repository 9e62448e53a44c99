//! Turning captured exchanges into text
//!
//! Every function here is pure: the same exchange and configuration always
//! render the same block. Absent or undecodable fields render as
//! [`NULL_PLACEHOLDER`]; nothing in this module can fail.

use serde_json::Value;

use crate::capture::{CapturedExchange, Headers, RequestSnapshot};
use crate::config::{LogLevel, LogOption, LogOptions};

/// Substituted for any absent or undecodable field.
pub const NULL_PLACEHOLDER: &str = "(null)";
/// Banner opening and closing each block when [`LogOption::IncludeSeparator`] is set.
pub const SEPARATOR: &str = "*******************************";

/// Render the request block, or `None` when the level prints no request.
pub fn format_request(
    request: &RequestSnapshot,
    level: LogLevel,
    options: LogOptions,
) -> Option<String> {
    let url = request.url.as_deref().unwrap_or(NULL_PLACEHOLDER);

    let block = match level {
        LogLevel::All => {
            let headers = render_optional_headers(request.headers.as_ref());
            let body = render_or_null(
                request.body.as_deref(),
                options.contains(LogOption::JsonPrettyPrint),
            );
            format!(
                "[Request] {} '{}':\n\n[Headers]\n{}\n\n[Body]\n{}",
                request.method, url, headers, body
            )
        }
        LogLevel::Info => format!("[Request] {} '{}'", request.method, url),
        LogLevel::None | LogLevel::Error => return None,
    };

    Some(with_separator(block, options))
}

/// Render the response block, or `None` when there is nothing to report
/// for this level.
pub fn format_response(
    exchange: &CapturedExchange,
    level: LogLevel,
    options: LogOptions,
) -> Option<String> {
    if level == LogLevel::None {
        return None;
    }
    if exchange.request.is_none() && exchange.response.head.is_none() {
        return None;
    }

    let url = exchange.url().unwrap_or(NULL_PLACEHOLDER);
    let elapsed = format_elapsed(exchange.elapsed_secs());
    let title = if exchange.is_success() {
        "Response"
    } else {
        "Response Error"
    };

    let block = match level {
        LogLevel::All => {
            let headers = render_optional_headers(
                exchange.response.head.as_ref().map(|head| &head.headers),
            );
            let body = render_or_null(
                exchange.response.body.as_deref(),
                options.contains(LogOption::JsonPrettyPrint),
            );
            format!(
                "[{}] {} '{}' {}:\n\n[Headers]\n{}\n\n[Body]\n{}",
                title,
                exchange.status_code(),
                url,
                elapsed,
                headers,
                body
            )
        }
        LogLevel::Info => format!(
            "[{}] {} '{}' {}",
            title,
            exchange.status_code(),
            url,
            elapsed
        ),
        LogLevel::Error => {
            let error = exchange.response.error.as_deref()?;
            format!(
                "[{}] {} '{}' {} s: {}",
                title,
                exchange.method().unwrap_or(NULL_PLACEHOLDER),
                url,
                elapsed,
                error
            )
        }
        LogLevel::None => return None,
    };

    Some(with_separator(block, options))
}

/// Render a body: pretty JSON when asked for and possible, else UTF-8 text.
///
/// Returns `None` for an absent body or one that is not valid UTF-8.
pub fn render_body(bytes: Option<&[u8]>, pretty_print: bool) -> Option<String> {
    let bytes = bytes?;

    if pretty_print {
        if let Some(pretty) = serde_json::from_slice::<Value>(bytes)
            .ok()
            .and_then(|json| render_json(&json))
        {
            return Some(pretty);
        }
    }

    std::str::from_utf8(bytes).ok().map(str::to_owned)
}

/// Render a header map as a pretty JSON object, keys in sorted order.
pub fn render_headers(headers: &Headers) -> Option<String> {
    serde_json::to_value(headers)
        .ok()
        .and_then(|json| render_json(&json))
}

/// Elapsed seconds as `[0.1234 s]`. Negative input is clamped to zero.
pub fn format_elapsed(seconds: f64) -> String {
    format!("[{:.4} s]", seconds.max(0.0))
}

fn render_json(json: &Value) -> Option<String> {
    serde_json::to_string_pretty(json).ok()
}

fn render_optional_headers(headers: Option<&Headers>) -> String {
    headers
        .and_then(render_headers)
        .unwrap_or_else(|| NULL_PLACEHOLDER.to_string())
}

fn render_or_null(bytes: Option<&[u8]>, pretty_print: bool) -> String {
    render_body(bytes, pretty_print).unwrap_or_else(|| NULL_PLACEHOLDER.to_string())
}

fn with_separator(block: String, options: LogOptions) -> String {
    if options.contains(LogOption::IncludeSeparator) {
        format!("{}\n{}\n{}", SEPARATOR, block, SEPARATOR)
    } else {
        block
    }
}
