//! anfgate - Azure NetApp Files Management Gateway
//!
//! An HTTP gateway for managing Azure NetApp Files accounts and capacity
//! pools: validated REST requests are forwarded to the Azure Resource
//! Manager control plane, optionally blocking on long-running operations.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod netapp;
pub mod server;
pub mod utils;

// Re-export commonly used types
pub use error::{AnfGateError, Result};
