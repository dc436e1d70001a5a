//! Shared utilities for applications built on the ETLT crates.

#![deny(unsafe_code)]

pub mod logging;

pub use logging::{LogConfig, LogError, LogFormat, init_logging, init_logging_with_writer};
