//! Configuration management module
//!
//! This module handles configuration loading from environment variables
//! and startup validation.

pub mod settings;

pub use settings::*;
