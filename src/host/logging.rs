use std::fs::File;
use std::io::{IsTerminal, stdout};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn setup_logging_file(level: tracing::Level) {
    let tempdir = std::env::temp_dir();
    let logfile = tempdir.join("keybridge.log");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(File::create(logfile).unwrap())
        .log_internal_errors(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(LevelFilter::from_level(level))
        .init();
}

pub fn setup_logging_stdio(level: tracing::Level) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .with_line_number(false)
        .with_level(false)
        .without_time();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(stdout().is_terminal())
        .event_format(format)
        .log_internal_errors(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(LevelFilter::from_level(level))
        .init();
}
