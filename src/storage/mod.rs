//! Storage Layer
//!
//! Handles the only persisted state: the JSON client configuration.
//! Session state lives in memory for the lifetime of the process.

pub mod config;

pub use config::*;
