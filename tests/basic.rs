use activity_logger::{LogLevel, LogOptions, LoggerConfig};

#[test]
fn test_version() {
    assert!(!activity_logger::VERSION.is_empty());
}

#[test]
fn test_default_config_logs_everything() {
    let config = LoggerConfig::default();
    assert_eq!(config.level, LogLevel::All);
    assert_eq!(config.options, LogOptions::DEFAULT);
}
