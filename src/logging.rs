//! Tracing setup.
//!
//! Logging is off unless `SPARK_PAGE_LOG` is set. Its value is an
//! `EnvFilter` directive string, e.g. `SPARK_PAGE_LOG=spark_page=debug`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "SPARK_PAGE_LOG";

/// Install a stderr `fmt` subscriber if `SPARK_PAGE_LOG` is set.
///
/// Returns false when logging stays disabled or a global subscriber was
/// already installed.
pub fn init_tracing() -> bool {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return false;
    };

    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry().with(filter).with(layer).try_init().is_ok()
}
