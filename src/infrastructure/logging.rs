use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::SttError;

/// Initialize the logging system with console output and optional file
/// rotation.
///
/// Returns a guard that must be kept alive for the duration of the
/// application. When the guard is dropped, any remaining logs are flushed.
pub fn init_logging(
    logs_dir: &Path,
    level: &str,
    file_logging: bool,
) -> Result<Option<WorkerGuard>, SttError> {
    if file_logging {
        fs::create_dir_all(logs_dir)?;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("murmur={},warn", level)));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(env_filter);

    if file_logging {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, "murmur.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(format!("murmur={}", level)));

        // try_init so a host application that already installed a
        // subscriber does not panic.
        let _ = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init();

        Ok(Some(guard))
    } else {
        let _ = tracing_subscriber::registry().with(console_layer).try_init();
        Ok(None)
    }
}
