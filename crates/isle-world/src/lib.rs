//! # Isle World
//!
//! Procedural world generation for Project Isle.
//!
//! This crate handles:
//! - Biome classification from temperature and moisture noise
//! - Terrain synthesis per biome
//! - Clustered decoration placement
//! - The world grid, its queries and occupancy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod biome;
pub mod config;
pub mod decoration;
pub mod terrain;
pub mod tile;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::biome::*;
    pub use crate::config::*;
    pub use crate::decoration::*;
    pub use crate::terrain::*;
    pub use crate::tile::*;
    pub use crate::world::*;
}

pub use prelude::*;
