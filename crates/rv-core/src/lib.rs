//! rusty-votes/crates/rv-core/src/lib.rs
//!
//! The central domain logic and interface definitions for rusty-votes.

pub mod models;
pub mod traits;
pub mod error;
pub mod ranks;
pub mod service;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;
