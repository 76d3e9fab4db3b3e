//! # Isle Gameplay
//!
//! Thin game layer over a generated Isle world.
//!
//! This crate provides:
//! - Building placement through tile occupancy
//! - Walk checks that respect water, occupancy and blocking decorations
//! - A player that moves over walkable ground and gathers wood and stone

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod building;
pub mod collision;
pub mod player;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::building::*;
    pub use crate::collision::*;
    pub use crate::player::*;
}

pub use prelude::*;
