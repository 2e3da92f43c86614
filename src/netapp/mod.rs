//! NetApp management module
//!
//! This module provides account and capacity pool management against the
//! Azure NetApp Files control plane, including long-running-operation
//! handling.

pub mod manager;
pub mod models;
pub mod operations;

pub use manager::*;
pub use models::*;
pub use operations::*;
