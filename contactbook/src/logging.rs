//! Diagnostic tracing shared by the CLI and the UI server.
//!
//! Both binaries log to stderr so diagnostics never mix with the contact list
//! printed on stdout. `RUST_LOG` replaces the binary's default filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// CLI default: only problems.
pub const CLI_FILTER: &str = "warn";
/// UI default: server lifecycle and one line per request.
pub const UI_FILTER: &str = "warn,contactbook_ui=info,tower_http=info";

/// `RUST_LOG` if set and valid, else `default`.
fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber.
///
/// # Example
/// ```bash
/// RUST_LOG=contactbook=debug contactbook list
/// ```
pub fn init(default: &str) {
    tracing_subscriber::registry()
        .with(filter(default))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
