//! Request handler module
//!
//! Request routing dispatch and the request-to-file resolution core.

pub mod resolver;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
