//! `oravision-config`: runtime configuration.
//!
//! Provides:
//! - Typed config schema (server, vision, ORA, logging)
//! - Environment loading with fixed fallback defaults
//! - Config redaction for safe logging/display

pub mod env;
pub mod redact;
pub mod schema;

pub use redact::{redact, redact_value};
pub use schema::{LoggingConfig, OraConfig, OravisionConfig, ServerConfig, VisionAuth, VisionConfig};
