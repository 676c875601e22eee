//! HTTP protocol layer module
//!
//! Response builders, cache validation and MIME detection shared by the
//! JSON API and the static file mount.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_404_response, build_413_response, build_cached_response,
    build_options_response, build_redirect_response,
};
