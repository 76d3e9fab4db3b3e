//! Terrain synthesis: one tile type per cell from its biome and the noise field.

use fastrand::Rng;
use isle_kernel::NoiseField;

use crate::biome::Biome;
use crate::config::GenerationConfig;
use crate::tile::TileType;

/// Picks tile types for cells of a classified biome map.
#[derive(Debug, Clone, Copy)]
pub struct TerrainSynthesizer<'a> {
    noise: &'a NoiseField,
    config: &'a GenerationConfig,
}

impl<'a> TerrainSynthesizer<'a> {
    /// Creates a synthesizer over the world's noise field.
    #[must_use]
    pub const fn new(noise: &'a NoiseField, config: &'a GenerationConfig) -> Self {
        Self { noise, config }
    }

    /// Tile type for the cell at `(x, y)`.
    ///
    /// Draws exactly one water-spawn sample from `rng` per call.
    pub fn tile_type_at(&self, x: i32, y: i32, biome: Biome, rng: &mut Rng) -> TileType {
        let (fx, fy) = (x as f32, y as f32);
        let detail = self
            .noise
            .noise_2d(fx * self.config.detail_scale, fy * self.config.detail_scale);

        if biome.should_spawn_water(rng) {
            let body = self.noise.fractal_noise_2d(
                fx * self.config.water_scale,
                fy * self.config.water_scale,
                self.config.water_octaves,
                self.config.water_persistence,
            );
            if body < self.config.water_threshold {
                return TileType::Water;
            }
        }

        if detail < self.config.secondary_threshold {
            biome.primary_tile()
        } else {
            biome.secondary_tile()
        }
    }
}
