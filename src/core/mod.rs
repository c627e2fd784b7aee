//! Core infrastructure: configuration, errors, host access and console output.

pub mod config;
pub mod error;
pub mod host;
pub mod output;
