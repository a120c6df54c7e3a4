//! HTTP middleware.
//!
//! Layer order, outermost first:
//! 1. `TraceLayer` opens the `http_request` span
//! 2. Request ID fills `request_id` on that span and echoes the header

pub mod request_id;

pub use request_id::{request_id_middleware, REQUEST_ID_HEADER};
