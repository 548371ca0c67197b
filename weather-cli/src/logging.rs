use std::fs::File;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Set `IR_WEATHER_LOG` to a file path to write logs there.
pub const LOG_PATH_ENV: &str = "IR_WEATHER_LOG";

/// Where log lines end up.
#[derive(Debug)]
enum LogSink {
    File(File),
    Stderr,
    Off,
}

/// The file named by `log_path` when it opens. Otherwise the full-screen mode
/// stays silent so the display is not corrupted, and plain mode uses stderr.
fn choose_sink(log_path: Option<&str>, full_screen: bool) -> LogSink {
    if let Some(log_path) = log_path {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
        {
            Ok(file) => return LogSink::File(file),
            Err(err) => eprintln!("Warning: Failed to open log file {log_path}: {err}"),
        }
    }

    if full_screen {
        LogSink::Off
    } else {
        LogSink::Stderr
    }
}

/// Initialize tracing.
pub fn init_tracing(full_screen: bool) {
    let log_path = std::env::var(LOG_PATH_ENV).ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match choose_sink(log_path.as_deref(), full_screen) {
        LogSink::File(file) => {
            let file_layer = fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .init();
        }
        LogSink::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        LogSink::Off => {}
    }
}
