//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, upstream endpoints, input limits)
//! - CLI option types and parsing
//! - The library-level `Config` handed to the proxy at startup

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    AnalyzeArgs, Cli, Command, Config, ConfigValidationError, Credential, Credentials,
    IdentifierKind, LogFormat, LogLevel, ServeArgs, UpstreamEndpoints,
};
