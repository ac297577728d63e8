use std::io;
use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is not set
const DEFAULT_FILTER: &str = "info";

/// Filter used for the log file, which keeps more detail than stderr
const FILE_FILTER: &str = "info,identity=debug,pipeline=debug";

pub fn configure_logging(log_dir: Option<&Path>) {
    // Stderr log configuration; stdout carries the JSON result
    let stderr_log = fmt::layer().with_writer(io::stderr).with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    );

    // File log configuration
    let file_log = log_dir.map(|dir| {
        let file_appender = rolling::daily(dir, "invigil.log");
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_filter(EnvFilter::new(FILE_FILTER))
    });

    tracing_subscriber::Registry::default()
        .with(stderr_log)
        .with(file_log)
        .init();
}
