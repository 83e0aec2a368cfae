use crate::Result;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// `RUST_LOG` wins, otherwise the filter follows the `-v` count.
fn env_filter(debug: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match debug {
            0 | 1 => "info",
            2 => "debug",
            _ => "trace",
        })
    })
}

pub fn init_tracing_subscriber(
    debug: u8,
    save_logs_file: bool,
    output_dir: &Path,
    filename: &str,
) -> Result<()> {
    // base for the subscriber
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_span_events(FmtSpan::CLOSE);

    if save_logs_file {
        let filename = format!("{}.log", filename);
        let file_appender = RollingFileAppender::new(Rotation::NEVER, output_dir, filename);
        let subscriber = subscriber
            .with_ansi(false)
            .with_file(false)
            .with_target(false)
            .with_writer(file_appender)
            .finish();

        // add log in terminal as an additional layer
        let stdout_layer = layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true)
            .with_file(false)
            .with_target(false);

        tracing::subscriber::set_global_default(subscriber.with(stdout_layer))?;
    } else {
        let subscriber = subscriber
            .with_ansi(true)
            .with_file(false)
            .with_target(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}
