//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - HTTP client used for every outbound call
//! - The `rustls` crypto provider for the HTTPS listener
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod crypto;
mod logger;

// Re-export public API
pub use client::{init_browsing_client, init_client};
pub use crypto::init_crypto_provider;
pub use logger::init_logger_with;
