//! Process-wide log setup for binaries and test harnesses embedding folio.
//!
//! Library crates only emit through `tracing` macros; nothing is printed until
//! one of these initializers installs a subscriber.

use serde::{Deserialize, Serialize};

/// Subscriber configuration (filters, formats).
pub mod tracing;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Human-readable multi-line output for local runs.
    Pretty,
}

/// Install JSON logging filtered by `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Like [`init`], with an explicit output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}
