use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("product_scraper=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Logs to the console and appends the same lines (without colours) to
/// `log_file`. Falls back to console-only logging when the file cannot be
/// opened, and returns that error so the caller can report it.
pub fn init_cli_logger(verbose: bool, log_file: &str) -> std::io::Result<()> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            TIMESTAMP_FORMAT.to_string(),
        ))
        .with_writer(std::io::stderr);

    let file = open_log_file(log_file);
    let (file_layer, file_error) = match file {
        Ok(file) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
                    TIMESTAMP_FORMAT.to_string(),
                ))
                .with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(console_layer)
        .with(file_layer)
        .init();

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn open_log_file(log_file: &str) -> std::io::Result<std::fs::File> {
    if let Some(parent) = Path::new(log_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(log_file)
}
