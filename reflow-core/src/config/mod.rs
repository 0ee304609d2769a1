//! Configuration types
//!
//! Board-agnostic controller tuning stored as postcard binary data.

pub mod types;

pub use types::*;
