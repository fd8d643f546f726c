//! Request/response definitions for the OneOnOne record-management API
//!
//! This crate defines the JSON bodies exchanged between the main server and
//! its clients: one request and one response type per endpoint, wire views of
//! the stored records, and the error envelope.

mod error;
pub mod requests;
pub mod responses;
mod types;

pub use error::*;
pub use types::*;
