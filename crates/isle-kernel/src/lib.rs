//! # Isle Kernel
//!
//! Pure math underneath world generation and rendering.
//!
//! This crate provides:
//! - Seeded gradient noise and its fractal composition
//! - Isometric projection between grid and screen space
//! - Draw-order keys for back-to-front compositing
//! - A viewport camera composed with the projection for picking
//!
//! Nothing here allocates per query, logs, or holds mutable global state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod camera;
pub mod isometric;
pub mod noise;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::camera::*;
    pub use crate::isometric::*;
    pub use crate::noise::*;
}

pub use prelude::*;
