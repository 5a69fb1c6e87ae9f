//! Structured logging for Oravision.
//!
//! Handles subscriber setup, secret redaction, and per-request event records.

pub mod logger;
pub mod redact;
pub mod request_events;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
pub use request_events::{EventLogger, RequestEvent, RequestLogEntry};
