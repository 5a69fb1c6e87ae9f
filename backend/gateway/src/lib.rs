//! Oravision HTTP API server.
//!
//! JSON routes for image analysis and ORA answers, plus a demo page at `/`.

pub mod api;
pub mod error;
pub mod index_page;
pub mod server;

pub use error::ApiError;
pub use server::{GatewayState, MAX_BODY_BYTES, build_router, start_server};
