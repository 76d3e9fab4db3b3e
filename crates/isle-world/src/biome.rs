//! Biome classification.
//!
//! This module provides:
//! - Biome type definitions with their constant characteristics
//! - Classification of a (temperature, moisture) sample into a biome
//! - Biome-map synthesis from two decorrelated fractal noise fields
//! - Seeded spawn draws used by terrain and decoration placement

use fastrand::Rng;
use isle_kernel::NoiseField;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::tile::TileType;

/// Types of biomes in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BiomeType {
    /// Dense trees on grass.
    Forest,
    /// Open grassland.
    #[default]
    Plains,
    /// Sand with scattered rock.
    Desert,
    /// Cold stone highlands.
    Mountains,
    /// Cold, wet lowland with standing water.
    Wetlands,
}

/// Constant properties of a biome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeCharacteristics {
    /// Tile type covering most of the biome
    pub primary_tile: TileType,
    /// Tile type used where detail noise peaks
    pub secondary_tile: TileType,
    /// Chance per cell of a tree
    pub tree_probability: f32,
    /// Chance per cell of a bush
    pub bush_probability: f32,
    /// Chance per cell of rocks
    pub rock_probability: f32,
    /// Chance per cell of a water-body check
    pub water_probability: f32,
}

const fn traits(
    primary_tile: TileType,
    secondary_tile: TileType,
    tree_probability: f32,
    bush_probability: f32,
    rock_probability: f32,
    water_probability: f32,
) -> BiomeCharacteristics {
    BiomeCharacteristics {
        primary_tile,
        secondary_tile,
        tree_probability,
        bush_probability,
        rock_probability,
        water_probability,
    }
}

/// Characteristics indexed by `BiomeType as usize`.
const CHARACTERISTICS: [BiomeCharacteristics; 5] = [
    traits(TileType::Grass, TileType::Dirt, 0.25, 0.15, 0.05, 0.05),
    traits(TileType::Grass, TileType::Dirt, 0.08, 0.10, 0.03, 0.02),
    traits(TileType::Sand, TileType::Stone, 0.02, 0.05, 0.15, 0.01),
    traits(TileType::Stone, TileType::Dirt, 0.05, 0.05, 0.30, 0.02),
    traits(TileType::Grass, TileType::Water, 0.12, 0.20, 0.05, 0.25),
];

impl BiomeType {
    /// Every biome in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Forest,
        Self::Plains,
        Self::Desert,
        Self::Mountains,
        Self::Wetlands,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Forest => "Forest",
            Self::Plains => "Plains",
            Self::Desert => "Desert",
            Self::Mountains => "Mountains",
            Self::Wetlands => "Wetlands",
        }
    }

    /// Constant characteristics.
    #[must_use]
    pub const fn characteristics(self) -> BiomeCharacteristics {
        CHARACTERISTICS[self as usize]
    }

    /// Classifies a climate sample. Both inputs are expected in [0, 1].
    #[must_use]
    pub fn classify(temperature: f32, moisture: f32) -> Self {
        if temperature < 0.3 {
            if moisture > 0.5 {
                Self::Wetlands
            } else {
                Self::Mountains
            }
        } else if temperature < 0.6 {
            if moisture > 0.6 {
                Self::Forest
            } else if moisture > 0.3 {
                Self::Plains
            } else {
                Self::Desert
            }
        } else if moisture > 0.5 {
            Self::Forest
        } else {
            Self::Desert
        }
    }
}

impl std::fmt::Display for BiomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A biome paired with its spawn rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Biome {
    biome_type: BiomeType,
}

impl Biome {
    /// Wraps a biome type.
    #[must_use]
    pub const fn new(biome_type: BiomeType) -> Self {
        Self { biome_type }
    }

    /// The wrapped biome type.
    #[must_use]
    pub const fn biome_type(self) -> BiomeType {
        self.biome_type
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.biome_type.name()
    }

    /// Constant characteristics.
    #[must_use]
    pub const fn characteristics(self) -> BiomeCharacteristics {
        self.biome_type.characteristics()
    }

    /// Tile type covering most of the biome.
    #[must_use]
    pub const fn primary_tile(self) -> TileType {
        self.characteristics().primary_tile
    }

    /// Tile type used where detail noise peaks.
    #[must_use]
    pub const fn secondary_tile(self) -> TileType {
        self.characteristics().secondary_tile
    }

    /// Draws whether a tree may spawn.
    pub fn should_spawn_tree(self, rng: &mut Rng) -> bool {
        rng.f32() < self.characteristics().tree_probability
    }

    /// Draws whether a bush may spawn.
    pub fn should_spawn_bush(self, rng: &mut Rng) -> bool {
        rng.f32() < self.characteristics().bush_probability
    }

    /// Draws whether rocks may spawn.
    pub fn should_spawn_rock(self, rng: &mut Rng) -> bool {
        rng.f32() < self.characteristics().rock_probability
    }

    /// Draws whether a cell is checked against the water-body field.
    pub fn should_spawn_water(self, rng: &mut Rng) -> bool {
        rng.f32() < self.characteristics().water_probability
    }
}

impl From<BiomeType> for Biome {
    fn from(biome_type: BiomeType) -> Self {
        Self::new(biome_type)
    }
}

/// Samples temperature and moisture for a cell.
#[must_use]
pub fn sample_climate(noise: &NoiseField, config: &GenerationConfig, x: i32, y: i32) -> (f32, f32) {
    let (x, y) = (x as f32, y as f32);
    let temperature = noise.fractal_noise_2d(
        x * config.biome_scale,
        y * config.biome_scale,
        config.biome_octaves,
        config.biome_persistence,
    );
    let moisture = noise.fractal_noise_2d(
        (x + config.moisture_offset) * config.biome_scale,
        (y + config.moisture_offset) * config.biome_scale,
        config.biome_octaves,
        config.biome_persistence,
    );
    (temperature, moisture)
}

/// Builds a row-major biome map of the given size.
#[must_use]
pub fn synthesize_biome_map(
    noise: &NoiseField,
    config: &GenerationConfig,
    width: u32,
    height: u32,
) -> Vec<BiomeType> {
    let mut biomes = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let (temperature, moisture) = sample_climate(noise, config, x, y);
            biomes.push(BiomeType::classify(temperature, moisture));
        }
    }
    biomes
}
