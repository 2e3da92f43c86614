//! Authentication module for Azure services
//!
//! This module provides credential resolution for the Azure Resource
//! Manager control plane, with an injectable provider trait so tests can
//! substitute a fixed identity.

pub mod provider;

pub use provider::*;
