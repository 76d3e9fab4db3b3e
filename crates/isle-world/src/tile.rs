//! Grid cells and their surface types.

use isle_common::GridCoord;
use serde::{Deserialize, Serialize};

use crate::decoration::Decoration;

/// Surface type of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    /// Grass
    #[default]
    Grass,
    /// Water (the only impassable surface)
    Water,
    /// Sand
    Sand,
    /// Bare stone
    Stone,
    /// Dirt
    Dirt,
    /// Snow
    Snow,
}

impl TileType {
    /// Every tile type in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Grass,
        Self::Water,
        Self::Sand,
        Self::Stone,
        Self::Dirt,
        Self::Snow,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "Grass",
            Self::Water => "Water",
            Self::Sand => "Sand",
            Self::Stone => "Stone",
            Self::Dirt => "Dirt",
            Self::Snow => "Snow",
        }
    }

    /// Whether units can stand on this surface.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Water)
    }

    /// Render color as linear RGBA.
    #[must_use]
    pub const fn color(self) -> [f32; 4] {
        match self {
            Self::Grass => [0.2, 0.8, 0.2, 1.0],
            Self::Water => [0.2, 0.4, 0.9, 1.0],
            Self::Sand => [0.9, 0.8, 0.5, 1.0],
            Self::Stone => [0.5, 0.5, 0.5, 1.0],
            Self::Dirt => [0.5, 0.3, 0.1, 1.0],
            Self::Snow => [0.9, 0.9, 1.0, 1.0],
        }
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of texture variations per tile type.
pub const TILE_VARIATIONS: u8 = 10;

/// A single grid cell.
///
/// `walkable` always mirrors [`TileType::is_walkable`] of the current type.
/// `occupied` is independent of it: a building sits on walkable ground and
/// marks it occupied without touching the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    coord: GridCoord,
    tile_type: TileType,
    walkable: bool,
    occupied: bool,
    decoration: Option<Decoration>,
    resource: bool,
    variation: u8,
}

impl Tile {
    /// Creates a bare grass tile.
    #[must_use]
    pub fn new(coord: GridCoord, variation: u8) -> Self {
        let tile_type = TileType::default();
        Self {
            coord,
            tile_type,
            walkable: tile_type.is_walkable(),
            occupied: false,
            decoration: None,
            resource: false,
            variation: variation % TILE_VARIATIONS,
        }
    }

    /// Grid position.
    #[must_use]
    pub const fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Surface type.
    #[must_use]
    pub const fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Whether the surface can be walked on.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// Whether something (a building) stands on this tile.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Decoration on this tile, if any.
    #[must_use]
    pub const fn decoration(&self) -> Option<Decoration> {
        self.decoration
    }

    /// Decoration tag such as `"tree_4"`, or an empty string.
    #[must_use]
    pub fn decoration_tag(&self) -> String {
        self.decoration.map(|d| d.to_string()).unwrap_or_default()
    }

    /// Whether the decoration can be gathered.
    #[must_use]
    pub const fn has_resource(&self) -> bool {
        self.resource
    }

    /// Texture variation index in `0..TILE_VARIATIONS`.
    #[must_use]
    pub const fn variation(&self) -> u8 {
        self.variation
    }

    /// Walkable and unoccupied.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.walkable && !self.occupied
    }

    /// Marks the tile occupied or free.
    pub fn set_occupied(&mut self, occupied: bool) {
        self.occupied = occupied;
    }

    pub(crate) fn set_type(&mut self, tile_type: TileType) {
        self.tile_type = tile_type;
        self.walkable = tile_type.is_walkable();
    }

    pub(crate) fn set_decoration(&mut self, decoration: Decoration) {
        self.resource = decoration.is_resource();
        self.decoration = Some(decoration);
    }

    pub(crate) fn take_decoration(&mut self) -> Option<Decoration> {
        self.resource = false;
        self.decoration.take()
    }
}
