use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger};

use crate::config::{Config, LogLevel};

fn level_filter(level: LogLevel) -> LevelFilter {
    let level = match level {
        LogLevel::Critical => Level::Critical,
        LogLevel::Error => Level::Error,
        LogLevel::Warn => Level::Warn,
        LogLevel::Info => Level::Info,
        LogLevel::Debug => Level::Debug,
        LogLevel::Trace => Level::Trace,
    };
    LevelFilter::MoreSevereEqual(level)
}

fn console_sink(std_stream: StdStream, filter: LevelFilter) -> spdlog::Result<Arc<StdStreamSink>> {
    let sink = StdStreamSink::builder()
        .std_stream(std_stream)
        .level_filter(filter)
        .build()?;
    Ok(Arc::new(sink))
}

/// Replaces the default logger when the configuration has a `[log]` section.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    let Some(ref log) = config.log else {
        return Ok(());
    };

    let mut builder = Logger::builder();

    if let Some(ref location) = log.location {
        let daily_sink = Arc::new(RotatingFileSink::builder()
            .base_path(location)
            .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
            .max_files(30)
            .rotate_on_open(false)
            .build()?);
        builder.sink(daily_sink);
    }

    // Warnings and failed files go to stderr, progress to stdout
    if log.log_to_console || log.location.is_none() {
        builder.sink(console_sink(StdStream::Stdout, LevelFilter::MoreVerbose(Level::Warn))?);
        builder.sink(console_sink(StdStream::Stderr, LevelFilter::MoreSevereEqual(Level::Warn))?);
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(level_filter(log.level));

    spdlog::set_default_logger(logger);

    Ok(())
}
