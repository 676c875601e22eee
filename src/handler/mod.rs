//! Request handler module
//!
//! Routes each request to the activities API, the root redirect, health
//! probes or the static front-end mount.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
