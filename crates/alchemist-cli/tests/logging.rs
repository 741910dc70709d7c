//! Tests for logging configuration.

use std::path::PathBuf;

use alchemist_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[test]
fn default_config_is_quiet_pretty_stderr() {
    let config = LogConfig::default();
    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(config.use_env_filter);
    assert!(config.log_file.is_none());
}

#[test]
fn filter_directive_covers_workspace_crates() {
    let config = LogConfig::default().with_level_filter(LevelFilter::DEBUG);
    let directive = config.filter_directive();
    assert!(directive.starts_with("warn,"));
    for name in [
        "alchemist_cli=debug",
        "alchemist_core=debug",
        "alchemist_ingest=debug",
        "alchemist_validate=debug",
        "alchemist_report=debug",
    ] {
        assert!(directive.contains(name), "missing {name} in {directive}");
    }
}

#[test]
fn builders_set_fields() {
    let config = LogConfig::default()
        .with_format(LogFormat::Json)
        .with_ansi(false)
        .with_timestamps(true)
        .with_log_file(Some(PathBuf::from("run.log")));
    assert_eq!(config.format, LogFormat::Json);
    assert!(!config.with_ansi);
    assert!(config.with_timestamps);
    assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
}
