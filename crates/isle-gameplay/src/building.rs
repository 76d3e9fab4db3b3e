//! Building placement on the world grid.
//!
//! A building covers a rectangular footprint anchored at its top grid corner
//! and extending along +x and +y. Placement marks every footprint tile
//! occupied; removal frees them again.

use isle_common::GridCoord;
use isle_world::World;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while placing or removing buildings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildingError {
    /// A footprint tile is missing, unwalkable or already occupied
    #[error("cannot place {building} at ({x}, {y}): tile ({blocked_x}, {blocked_y}) is blocked")]
    Blocked {
        /// Building kind
        building: BuildingType,
        /// Anchor X coordinate
        x: i32,
        /// Anchor Y coordinate
        y: i32,
        /// X coordinate of the first blocked tile
        blocked_x: i32,
        /// Y coordinate of the first blocked tile
        blocked_y: i32,
    },

    /// No building is anchored at the position
    #[error("no building anchored at ({x}, {y})")]
    NotFound {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
    },
}

/// Result type for building operations.
pub type BuildingResult<T> = Result<T, BuildingError>;

/// Kinds of buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    /// 2x2 dwelling
    House,
    /// 1x1 lookout
    Tower,
    /// 3x3 storage
    Warehouse,
}

impl BuildingType {
    /// Footprint size in tiles as (width, height).
    #[must_use]
    pub const fn footprint(self) -> (i32, i32) {
        match self {
            Self::House => (2, 2),
            Self::Tower => (1, 1),
            Self::Warehouse => (3, 3),
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Tower => "Tower",
            Self::Warehouse => "Warehouse",
        }
    }

    /// Grid cells covered when anchored at `anchor`.
    pub fn cells(self, anchor: GridCoord) -> impl Iterator<Item = GridCoord> {
        let (w, h) = self.footprint();
        (0..h).flat_map(move |dy| (0..w).map(move |dx| anchor.offset(dx, dy)))
    }
}

impl std::fmt::Display for BuildingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A placed building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Building kind
    pub building_type: BuildingType,
    /// Anchor tile
    pub anchor: GridCoord,
}

impl Building {
    /// Whether the footprint covers `coord`.
    #[must_use]
    pub fn covers(&self, coord: GridCoord) -> bool {
        let (w, h) = self.building_type.footprint();
        (self.anchor.x..self.anchor.x + w).contains(&coord.x)
            && (self.anchor.y..self.anchor.y + h).contains(&coord.y)
    }
}

/// Tracks buildings placed in a world.
#[derive(Debug, Clone, Default)]
pub struct BuildingSystem {
    buildings: Vec<Building>,
}

impl BuildingSystem {
    /// Creates an empty building system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First footprint cell that cannot take a building, if any.
    fn first_blocked(world: &World, building_type: BuildingType, anchor: GridCoord) -> Option<GridCoord> {
        building_type
            .cells(anchor)
            .find(|c| !world.tile(c.x, c.y).is_some_and(|t| t.is_available()))
    }

    /// Whether every footprint tile exists, is walkable and is unoccupied.
    #[must_use]
    pub fn can_place(&self, world: &World, building_type: BuildingType, anchor: GridCoord) -> bool {
        Self::first_blocked(world, building_type, anchor).is_none()
    }

    /// Places a building and marks its footprint occupied.
    pub fn place(
        &mut self,
        world: &mut World,
        building_type: BuildingType,
        anchor: GridCoord,
    ) -> BuildingResult<Building> {
        if let Some(blocked) = Self::first_blocked(world, building_type, anchor) {
            debug!("{} blocked at ({}, {})", building_type, blocked.x, blocked.y);
            return Err(BuildingError::Blocked {
                building: building_type,
                x: anchor.x,
                y: anchor.y,
                blocked_x: blocked.x,
                blocked_y: blocked.y,
            });
        }

        for cell in building_type.cells(anchor) {
            world.set_occupied(cell.x, cell.y, true);
        }
        let building = Building {
            building_type,
            anchor,
        };
        self.buildings.push(building);
        info!("Placed {} at ({}, {})", building_type, anchor.x, anchor.y);
        Ok(building)
    }

    /// Removes the building anchored at `anchor` and frees its footprint.
    pub fn remove(&mut self, world: &mut World, anchor: GridCoord) -> BuildingResult<Building> {
        let index = self
            .buildings
            .iter()
            .position(|b| b.anchor == anchor)
            .ok_or(BuildingError::NotFound {
                x: anchor.x,
                y: anchor.y,
            })?;
        let building = self.buildings.remove(index);

        for cell in building.building_type.cells(anchor) {
            world.set_occupied(cell.x, cell.y, false);
        }
        info!("Removed {} at ({}, {})", building.building_type, anchor.x, anchor.y);
        Ok(building)
    }

    /// Building whose footprint covers `coord`.
    #[must_use]
    pub fn building_at(&self, coord: GridCoord) -> Option<&Building> {
        self.buildings.iter().find(|b| b.covers(coord))
    }

    /// All placed buildings in placement order.
    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }
}
