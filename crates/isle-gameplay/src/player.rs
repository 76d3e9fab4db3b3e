//! Player movement and resource gathering.
//!
//! The player position is continuous grid space: tile `(x, y)` owns the
//! points that round to it, matching the rounding used by screen picking.

use glam::Vec2;
use isle_common::{GridCoord, WorldError};
use isle_world::{ResourceYield, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::collision;

/// Errors that can occur when the player interacts with the world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteractionError {
    /// Target is out of range
    #[error("target out of range: distance {distance:.1} > max {max:.1}")]
    OutOfRange {
        /// Actual distance
        distance: f32,
        /// Maximum allowed distance
        max: f32,
    },

    /// Target tile has nothing to gather
    #[error("nothing to gather at ({x}, {y})")]
    NothingToGather {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
    },

    /// Target lies outside the world
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Result type for interaction operations.
pub type InteractionResult<T> = Result<T, InteractionError>;

/// Player tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Movement speed in tiles per second
    pub speed: f32,
    /// Maximum distance to a tile that can be gathered from
    pub interaction_range: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            interaction_range: 1.5,
        }
    }
}

/// Gathered resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Wood from trees
    pub wood: u32,
    /// Stone from rocks
    pub stone: u32,
}

impl Inventory {
    fn add(&mut self, resource: ResourceYield) {
        match resource {
            ResourceYield::Wood => self.wood += 1,
            ResourceYield::Stone => self.stone += 1,
        }
    }
}

/// The player character.
#[derive(Debug, Clone)]
pub struct Player {
    position: Vec2,
    config: PlayerConfig,
    inventory: Inventory,
}

impl Player {
    /// Create a new player at the given grid position.
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        Self::with_config(position, PlayerConfig::default())
    }

    /// Create a new player with custom configuration.
    #[must_use]
    pub fn with_config(position: Vec2, config: PlayerConfig) -> Self {
        Self {
            position,
            config,
            inventory: Inventory::default(),
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Tile the player stands on.
    #[must_use]
    pub fn tile(&self) -> GridCoord {
        GridCoord::new(self.position.x.round() as i32, self.position.y.round() as i32)
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Gathered resources.
    #[must_use]
    pub const fn inventory(&self) -> Inventory {
        self.inventory
    }

    /// Whether a tile center is within interaction range.
    #[must_use]
    pub fn in_range(&self, target: GridCoord) -> bool {
        self.distance_to(target) <= self.config.interaction_range
    }

    fn distance_to(&self, target: GridCoord) -> f32 {
        self.position
            .distance(Vec2::new(target.x as f32, target.y as f32))
    }

    /// Moves along `direction` for `dt` seconds.
    ///
    /// Diagonal input is normalized so it is not faster than straight input.
    /// The move is rejected, leaving the player in place, when the
    /// destination tile cannot be walked on. Returns whether the player moved.
    pub fn try_move(&mut self, direction: Vec2, dt: f32, world: &World) -> bool {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO || dt <= 0.0 {
            return false;
        }

        let next = self.position + direction * self.config.speed * dt;
        let (x, y) = (next.x.round() as i32, next.y.round() as i32);
        if !collision::can_walk(world, x, y) {
            debug!("Move to ({:.2}, {:.2}) blocked", next.x, next.y);
            return false;
        }
        self.position = next;
        true
    }

    /// Gathers the resource on `target`, adding it to the inventory.
    pub fn interact(&mut self, target: GridCoord, world: &mut World) -> InteractionResult<ResourceYield> {
        world.try_tile(target.x, target.y)?;

        let distance = self.distance_to(target);
        if distance > self.config.interaction_range {
            return Err(InteractionError::OutOfRange {
                distance,
                max: self.config.interaction_range,
            });
        }

        let resource = world
            .gather_resource(target.x, target.y)
            .ok_or(InteractionError::NothingToGather {
                x: target.x,
                y: target.y,
            })?;
        self.inventory.add(resource);
        info!(
            "Gathered {:?} at ({}, {}), inventory: {} wood, {} stone",
            resource, target.x, target.y, self.inventory.wood, self.inventory.stone
        );
        Ok(resource)
    }
}
