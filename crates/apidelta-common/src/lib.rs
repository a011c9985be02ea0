//! Common constants and utilities for the apidelta crates.
//!
//! This crate provides the ambient pieces shared by every layer:
//! - Centralized limits and rendering markers (`limits`)
//! - Opt-in tracing subscriber setup (`tracing_config`)

// Centralized limits and thresholds
pub mod limits;

// Tracing subscriber setup driven by environment variables
pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};
