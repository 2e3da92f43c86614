//! Utility functions module
//!
//! This module contains shared helpers for HTTP client construction
//! and network error classification.

pub mod network;

pub use network::*;
