use env_logger::{Builder, Target};
use log::{Level, LevelFilter, SetLoggerError};
use std::env;
use std::io::Write;

pub fn parse_level(value: &str) -> LevelFilter {
    match value.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn init_logging() -> Result<(), SetLoggerError> {
    let env = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_level = parse_level(&env);

    let mut builder = Builder::new();

    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        let target = record.target();

        match record.level() {
            Level::Info => writeln!(buf, "{} [INFO] [{}]: {}", timestamp, target, record.args()),
            level => writeln!(
                buf,
                "{} [{}] [{}:{}] {}: {}",
                timestamp,
                level,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                target,
                record.args()
            ),
        }
    });

    builder.filter_level(log_level);

    // Filter out noisy modules in production
    if env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.filter_module("hyper", LevelFilter::Warn);
        builder.filter_module("sqlx", LevelFilter::Warn);
        builder.filter_module("wgpu_core", LevelFilter::Warn);
    }

    builder.target(Target::Stdout).try_init()
}

pub fn log_error_with_context(error: &(dyn std::error::Error + 'static), context: &str) {
    log::error!("[{}] {}", context, error);

    // Log chain of causes for better debugging
    let mut source = error.source();
    while let Some(err) = source {
        log::error!("  Caused by: {}", err);
        source = err.source();
    }
}

pub fn log_calendar_fetch(calendar_count: usize, duration_ms: u64) {
    log::info!("[Calendar] Fetched {} calendars in {}ms", calendar_count, duration_ms);
}

pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64) {
    log::debug!("[Database] {} on table {} took {}ms", operation, table, duration_ms);
}

pub fn log_auth_event(event: &str) {
    log::info!("[Auth] {}", event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_level("error"), LevelFilter::Error);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("trace"), LevelFilter::Trace);
        assert_eq!(parse_level("calpicker=debug"), LevelFilter::Info);
    }
}
