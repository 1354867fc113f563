//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`GateConfig`]: poll loop timing

pub mod gate_config;

pub use gate_config::{DEFAULT_POLL_INTERVAL, GateConfig};
