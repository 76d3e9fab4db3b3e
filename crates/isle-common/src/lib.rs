//! # Isle Common
//!
//! Common types shared by all Project Isle crates.
//!
//! This crate provides:
//! - Grid coordinates and tile dimensions
//! - Error types for world construction and configuration
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
}

pub use prelude::*;
