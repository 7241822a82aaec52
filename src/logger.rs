use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

// Info and below go to stdout, warnings and errors to stderr.
fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stdout = Arc::new(
        StdStreamSink::builder()
            .std_stream(StdStream::Stdout)
            .level_filter(LevelFilter::MoreVerbose(Level::Warn))
            .build()?,
    );

    let stderr = Arc::new(
        StdStreamSink::builder()
            .std_stream(StdStream::Stderr)
            .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
            .build()?,
    );

    builder.sink(stdout).sink(stderr);

    Ok(())
}

/// Installs the default logger from the `[log]` config section.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    let Some(ref log) = config.log else {
        return Ok(());
    };

    let mut builder = Logger::builder();

    // The server binary fills in a default location. Without one the file
    // sink is skipped and everything goes to the console.
    if let Some(ref location) = log.location {
        let daily_sink = Arc::new(
            RotatingFileSink::builder()
                .base_path(location)
                .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
                .max_files(60)
                .rotate_on_open(false)
                .build()?,
        );
        builder.sink(daily_sink);
    }

    if log.log_to_console || log.location.is_none() {
        add_console_sinks(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(log.level.into()));

    spdlog::set_default_logger(logger);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Defaults, Log, Paths, Server, Site};
    use std::path::PathBuf;

    #[test]
    fn test_missing_log_location_falls_back_to_console() {
        let config = Config {
            site: Site {
                title: "My notes".to_string(),
                author: "Sam".to_string(),
                birth_date: None,
            },
            paths: Paths {
                template_dir: PathBuf::from("res/templates"),
                public_dir: PathBuf::from("res/public"),
                posts_dir: PathBuf::from("res/content/posts"),
                prompts_dir: PathBuf::from("res/content/prompts"),
                pages_dir: PathBuf::from("res/pages"),
            },
            defaults: Defaults {
                feed_preview_count: 5,
                content_cache_enabled: true,
            },
            server: Server {
                address: "127.0.0.1".to_string(),
                port: 8001,
            },
            log: Some(Log {
                level: LogLevel::Info,
                log_to_console: false,
                location: None,
            }),
        };

        assert!(configure_logger(&config).is_ok());
    }
}
