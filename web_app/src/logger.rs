use anyhow::Context;
use log::LevelFilter;
use simplelog::{CombinedLogger, ConfigBuilder, SharedLogger, SimpleLogger, WriteLogger};
use std::fs::OpenOptions;

/// Logs app and request records to stdout, and appends app records to the
/// audit file at `audit_log_path`
pub fn setup_simple_logger(audit_log_path: &str) -> anyhow::Result<()> {
    let stdout_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("secure_pay")
        .add_filter_allow_str("ntex::web::middleware")
        .build();

    let audit_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("secure_pay")
        .build();

    let audit_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(audit_log_path)
        .with_context(|| format!("failed to open audit log at {audit_log_path}"))?;

    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        SimpleLogger::new(LevelFilter::Info, stdout_config),
        WriteLogger::new(LevelFilter::Info, audit_config, audit_file),
    ];

    Ok(CombinedLogger::init(loggers)?)
}
