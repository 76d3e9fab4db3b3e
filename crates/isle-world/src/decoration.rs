//! Decorations and their placement.
//!
//! Trees, rocks and bushes cluster where their own noise field peaks, so
//! forests and rock fields form instead of uniform scatter. Water only ever
//! receives ponds.

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;
use isle_common::GridCoord;
use isle_kernel::NoiseField;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biome::Biome;
use crate::config::{ClusterLayer, GenerationConfig};
use crate::tile::{Tile, TileType};

/// Number of tree sprites (`tree_0` to `tree_19`).
pub const TREE_TYPE_COUNT: u8 = 20;

/// Number of bush sprites (`bush_1` to `bush_3`).
pub const BUSH_TYPE_COUNT: u8 = 3;

/// Number of rock sprites (`rocks_1` to `rocks_2`).
pub const ROCK_TYPE_COUNT: u8 = 2;

/// An object standing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decoration {
    /// Tree sprite index, 0-based
    Tree(u8),
    /// Bush sprite index, 1-based
    Bush(u8),
    /// Rock sprite index, 1-based
    Rocks(u8),
    /// Pond on open water
    Pond,
}

impl Decoration {
    /// Whether gathering this decoration yields a resource.
    #[must_use]
    pub const fn is_resource(self) -> bool {
        matches!(self, Self::Tree(_) | Self::Rocks(_))
    }

    /// Resource obtained by gathering, if any.
    #[must_use]
    pub const fn resource_yield(self) -> Option<ResourceYield> {
        match self {
            Self::Tree(_) => Some(ResourceYield::Wood),
            Self::Rocks(_) => Some(ResourceYield::Stone),
            Self::Bush(_) | Self::Pond => None,
        }
    }

    /// Whether units are stopped by this decoration.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Tree(_) | Self::Rocks(_))
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(i) => write!(f, "tree_{i}"),
            Self::Bush(i) => write!(f, "bush_{i}"),
            Self::Rocks(i) => write!(f, "rocks_{i}"),
            Self::Pond => f.write_str("pond"),
        }
    }
}

/// Failure to parse a decoration tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecorationParseError {
    /// Prefix is not a known decoration kind
    #[error("Unknown decoration tag: {0}")]
    UnknownKind(String),

    /// Suffix is missing or not a number
    #[error("Invalid decoration index in tag: {0}")]
    InvalidIndex(String),

    /// Index is outside the sprite range of its kind
    #[error("Decoration index {index} out of range for {kind}")]
    IndexOutOfRange {
        /// Decoration kind prefix
        kind: &'static str,
        /// Parsed index
        index: u8,
    },
}

impl FromStr for Decoration {
    type Err = DecorationParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        if tag == "pond" {
            return Ok(Self::Pond);
        }

        let (kind, index) = tag
            .rsplit_once('_')
            .ok_or_else(|| DecorationParseError::UnknownKind(tag.to_string()))?;
        let (kind, range, build): (&'static str, _, fn(u8) -> Self) = match kind {
            "tree" => ("tree", 0..TREE_TYPE_COUNT, Self::Tree),
            "bush" => ("bush", 1..BUSH_TYPE_COUNT + 1, Self::Bush),
            "rocks" => ("rocks", 1..ROCK_TYPE_COUNT + 1, Self::Rocks),
            _ => return Err(DecorationParseError::UnknownKind(tag.to_string())),
        };
        let index = index
            .parse::<u8>()
            .map_err(|_| DecorationParseError::InvalidIndex(tag.to_string()))?;

        if range.contains(&index) {
            Ok(build(index))
        } else {
            Err(DecorationParseError::IndexOutOfRange { kind, index })
        }
    }
}

/// Resource obtained by gathering a decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceYield {
    /// From trees
    Wood,
    /// From rocks
    Stone,
}

/// Places decorations on synthesized terrain.
#[derive(Debug, Clone, Copy)]
pub struct DecorationPlacer<'a> {
    noise: &'a NoiseField,
    config: &'a GenerationConfig,
}

impl<'a> DecorationPlacer<'a> {
    /// Creates a placer over the world's noise field.
    #[must_use]
    pub const fn new(noise: &'a NoiseField, config: &'a GenerationConfig) -> Self {
        Self { noise, config }
    }

    /// Chooses the decoration for one cell, if any.
    ///
    /// Consumes Bernoulli draws from `rng`; callers must visit cells in a
    /// fixed order for generation to stay deterministic.
    pub fn choose(&self, tile: &Tile, biome: Biome, rng: &mut Rng) -> Option<Decoration> {
        if tile.tile_type() == TileType::Water {
            return (rng.f32() < self.config.pond_chance).then_some(Decoration::Pond);
        }
        if !tile.is_walkable() {
            return None;
        }

        self.clustered(tile.coord(), |kind| match kind {
            ClusterKind::Tree => biome.should_spawn_tree(rng),
            ClusterKind::Rock => biome.should_spawn_rock(rng),
            ClusterKind::Bush => biome.should_spawn_bush(rng),
        })
    }

    /// Picks a tree, rock or bush in that priority order.
    ///
    /// `gate` is asked once per kind, only when every earlier kind failed,
    /// so lazy biome draws keep their order.
    fn clustered(
        &self,
        coord: GridCoord,
        mut gate: impl FnMut(ClusterKind) -> bool,
    ) -> Option<Decoration> {
        let (x, y) = (coord.x as f32, coord.y as f32);

        if gate(ClusterKind::Tree) {
            let n = self.sample(&self.config.tree_layer, x, y);
            if n > self.config.tree_layer.threshold {
                return Some(Decoration::Tree(tree_index(n)));
            }
        }

        if gate(ClusterKind::Rock) {
            let n = self.sample(&self.config.rock_layer, x, y);
            if n > self.config.rock_layer.threshold {
                let index = above_threshold_index(n, self.config.rock_layer.threshold, ROCK_TYPE_COUNT);
                return Some(Decoration::Rocks(index));
            }
        }

        if gate(ClusterKind::Bush) {
            let n = self.sample(&self.config.bush_layer, x, y);
            if n > self.config.bush_layer.threshold {
                let index = above_threshold_index(n, self.config.bush_layer.threshold, BUSH_TYPE_COUNT);
                return Some(Decoration::Bush(index));
            }
        }

        None
    }

    /// Chooses and stores the decoration for one cell.
    pub fn decorate(&self, tile: &mut Tile, biome: Biome, rng: &mut Rng) {
        if let Some(decoration) = self.choose(tile, biome, rng) {
            tile.set_decoration(decoration);
        }
    }

    fn sample(&self, layer: &ClusterLayer, x: f32, y: f32) -> f32 {
        self.noise.fractal_noise_2d(
            (x + layer.offset) * layer.scale,
            (y + layer.offset) * layer.scale,
            self.config.decoration_octaves,
            self.config.decoration_persistence,
        )
    }
}

/// Clustered decoration kinds, in placement priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClusterKind {
    Tree,
    Rock,
    Bush,
}

/// Tree sprite for a tree-layer sample: `floor(n * 20) mod 20`.
fn tree_index(n: f32) -> u8 {
    // n is in [0, 1], so the product never exceeds the count
    ((n * f32::from(TREE_TYPE_COUNT)) as u8) % TREE_TYPE_COUNT
}

/// Maps the part of `n` above `threshold` onto a 1-based sprite index.
fn above_threshold_index(n: f32, threshold: f32, count: u8) -> u8 {
    let span = (1.0 - threshold).max(f32::EPSILON);
    let portion = ((n - threshold) / span).clamp(0.0, 1.0);
    let index = (portion * f32::from(count)) as u8;
    index.min(count - 1) + 1
}
