//! Tracing configuration for debugging signature rendering and tree
//! materialisation.
//!
//! Supports three output formats controlled by `APIDELTA_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ```bash
//! APIDELTA_LOG=debug APIDELTA_LOG_FORMAT=tree my-diff-tool old.jar new.jar
//! APIDELTA_LOG="apidelta_signature=trace" my-diff-tool old.jar new.jar
//! ```
//!
//! The subscriber is only initialised when `APIDELTA_LOG` (or `RUST_LOG`) is
//! set, so library users that never opt in pay nothing.
//!
//! A bare level in `APIDELTA_LOG` only applies to the apidelta crates:
//! `APIDELTA_LOG=debug` leaves the host application's own targets alone.
//! Full directives (`apidelta_tree=trace,warn`) are passed through as is.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_FILTER_VAR: &str = "APIDELTA_LOG";
const LOG_FORMAT_VAR: &str = "APIDELTA_LOG_FORMAT";

/// Tracing targets of the workspace crates.
const CRATE_TARGETS: [&str; 4] = [
    "apidelta_common",
    "apidelta_model",
    "apidelta_signature",
    "apidelta_tree",
];

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name. Unrecognised names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_VAR).unwrap_or_default())
    }
}

/// Expand a bare level into one directive per workspace crate. Anything
/// that is not a plain level is returned trimmed but otherwise unchanged.
pub fn scoped_directives(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() || value.parse::<LevelFilter>().is_err() {
        return value.to_string();
    }
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build an `EnvFilter` from `APIDELTA_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_FILTER_VAR) {
        EnvFilter::builder().parse_lossy(scoped_directives(&val))
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `APIDELTA_LOG` nor `RUST_LOG` is set. Output
/// goes to stderr. Calling this more than once is harmless: a second global
/// subscriber is silently rejected.
pub fn init_tracing() {
    let has_own_filter = std::env::var(LOG_FILTER_VAR).is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_own_filter && !has_rust_log {
        return;
    }

    let filter = build_filter();

    // try_init: the host process may already own the global subscriber
    let _ = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);

            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
