//! Tracing setup shared by the binaries.
//!
//! Both binaries log to stderr: stdout carries the MCP transport or the CLI
//! report.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `default_level` when it holds valid directives.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(default_level))
        .init();
}

/// Filter built from `RUST_LOG`, or from `default_level` when unset or invalid.
pub fn env_filter(default_level: &str) -> EnvFilter {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_filter(directives.as_deref(), default_level)
}

fn build_filter(directives: Option<&str>, default_level: &str) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}
