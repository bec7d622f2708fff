// Server module entry point
// Listener setup, connection handling and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// Re-export commonly used types
pub use connection::accept_connection;
pub use listener::create_reusable_listener;
pub use signal::{start_signal_handler, SignalHandler};
