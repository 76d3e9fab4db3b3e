//! Coordinate types for grid cells and tile dimensions.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Integer grid coordinate of a tile in the world.
///
/// `x` grows toward the lower-right edge of the isometric diamond and `y`
/// toward the lower-left edge. Negative values are valid coordinates; they
/// are simply never inside a world.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Pod, Zeroable,
)]
#[repr(C)]
pub struct GridCoord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate shifted by the given delta.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Converts to a row-major index for a grid of the given size.
    ///
    /// Returns `None` when the coordinate lies outside `width × height`.
    #[must_use]
    pub const fn to_index(self, width: u32, height: u32) -> Option<usize> {
        if self.x < 0 || self.y < 0 || self.x as u32 >= width || self.y as u32 >= height {
            return None;
        }
        Some((self.y as usize) * (width as usize) + (self.x as usize))
    }

    /// Creates from a row-major index.
    #[must_use]
    pub const fn from_index(index: usize, width: u32) -> Self {
        let w = width as usize;
        Self {
            x: (index % w) as i32,
            y: (index / w) as i32,
        }
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Pixel dimensions of one isometric tile (the diamond's bounding box).
///
/// Both dimensions are always positive; deserialization goes through the
/// same check as [`TileSize::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTileSize")]
pub struct TileSize {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawTileSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawTileSize> for TileSize {
    type Error = ConfigError;

    fn try_from(raw: RawTileSize) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl TileSize {
    /// Standard 2:1 isometric tile used by the default assets.
    pub const DEFAULT: Self = Self {
        width: 64,
        height: 32,
    };

    /// Creates a tile size. Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidTileSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Tile width in pixels.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Tile height in pixels.
    #[must_use]
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Half the tile width, the horizontal screen step per grid unit.
    #[must_use]
    pub fn half_width(self) -> f32 {
        self.width as f32 / 2.0
    }

    /// Half the tile height, the vertical screen step per grid unit.
    #[must_use]
    pub fn half_height(self) -> f32 {
        self.height as f32 / 2.0
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}
