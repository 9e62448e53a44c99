use super::{FileUtils, StringUtils, UrlUtils};
use crate::error::ActivityLoggerError;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn validate_url_adds_scheme() {
    let url = UrlUtils::validate_url("example.test/ok").expect("valid url");
    assert_eq!(url.scheme(), "http");
    assert_eq!(url.host_str(), Some("example.test"));
    assert_eq!(url.path(), "/ok");
}

#[test]
fn validate_url_rejects_invalid_input() {
    let err = UrlUtils::validate_url("http://").expect_err("invalid url");
    assert!(matches!(err, ActivityLoggerError::InvalidUrl(_)));
}

#[test]
fn expand_path_expands_home() {
    let home = dirs::home_dir().expect("home dir");
    let path = FileUtils::expand_path("~/activity-logger-test").expect("expanded");
    assert_eq!(path, home.join("activity-logger-test"));
}

#[test]
fn expand_path_leaves_non_tilde_unchanged() {
    let path = FileUtils::expand_path("/tmp/activity-logger").expect("expanded");
    assert_eq!(path, PathBuf::from("/tmp/activity-logger"));
}

#[test]
fn parse_header_splits_key_value() {
    let (key, value) = StringUtils::parse_header("X-Test: a:b").expect("header");
    assert_eq!(key, "X-Test");
    assert_eq!(value, "a:b");

    let err = StringUtils::parse_header("missing").expect_err("invalid header");
    assert!(matches!(err, ActivityLoggerError::Config(_)));

    let err = StringUtils::parse_header(": value").expect_err("empty name");
    assert!(matches!(err, ActivityLoggerError::Config(_)));
}

#[test]
fn parse_timeout_parses_suffixes() {
    assert_eq!(
        StringUtils::parse_timeout("10").expect("seconds"),
        Duration::from_secs(10)
    );
    assert_eq!(
        StringUtils::parse_timeout("2m").expect("minutes"),
        Duration::from_secs(120)
    );
    assert_eq!(
        StringUtils::parse_timeout("1h").expect("hours"),
        Duration::from_secs(3600)
    );

    let err = StringUtils::parse_timeout("5x").expect_err("invalid suffix");
    assert!(matches!(err, ActivityLoggerError::Config(_)));

    let err = StringUtils::parse_timeout("xs").expect_err("invalid number");
    assert!(matches!(err, ActivityLoggerError::Config(_)));
}

#[test]
fn parse_timeout_rejects_overflowing_suffix() {
    let err = StringUtils::parse_timeout("9999999999999999h").expect_err("overflow");
    assert!(matches!(err, ActivityLoggerError::Config(_)));

    let max_minutes = (u64::MAX / 60).to_string() + "m";
    assert_eq!(
        StringUtils::parse_timeout(&max_minutes).expect("fits"),
        Duration::from_secs(u64::MAX / 60 * 60)
    );
}
