//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! request-resolution logic.

pub mod date;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{build_404_response, build_405_response, Body};
