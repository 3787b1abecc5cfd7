//! Tracing setup shared by the Lambda functions and the CLI.
//!
//! Lambdas log flattened JSON to stdout for CloudWatch; the CLI logs
//! human-readable lines to stderr so stdout stays free for command output.

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used by Lambda functions when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output shape of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event on stdout, fields flattened.
    Json,
    /// Compact text on stderr.
    Text,
}

/// Initialize JSON tracing for a Lambda function.
///
/// Call once at the start of `main`, before the handler is served.
///
/// ```no_run
/// use reminder_lambda_shared::init_tracing;
///
/// #[tokio::main]
/// async fn main() -> Result<(), lambda_runtime::Error> {
///     init_tracing();
///     // ... build the handler and run it
///     Ok(())
/// }
/// ```
pub fn init_tracing() {
    init_tracing_with(LogFormat::Json, DEFAULT_LOG_FILTER);
}

/// Install the global subscriber in `format`, filtered by `RUST_LOG` or
/// `default_filter`. Later calls keep the first subscriber.
pub fn init_tracing_with(format: LogFormat, default_filter: &str) {
    let filter = resolve_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), default_filter);
    let registry = tracing_subscriber::registry().with(filter);

    let _ = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .try_init(),
    };
}

/// Use `directive` when it parses, otherwise `default_filter`.
fn resolve_filter(directive: Option<String>, default_filter: &str) -> EnvFilter {
    directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter))
}
