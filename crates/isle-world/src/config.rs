//! World generation tuning parameters.
//!
//! Every threshold and frequency used by the biome, terrain and decoration
//! passes lives here so worlds can be re-tuned from a config file without
//! touching the algorithms.

use isle_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Noise gate for one clustered decoration kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterLayer {
    /// Additive origin offset that decorrelates this field from the others
    pub offset: f32,
    /// Sampling frequency (grid units to noise units)
    pub scale: f32,
    /// The noise sample must exceed this value for the kind to be placed
    pub threshold: f32,
}

impl ClusterLayer {
    /// Creates a new layer.
    #[must_use]
    pub const fn new(offset: f32, scale: f32, threshold: f32) -> Self {
        Self {
            offset,
            scale,
            threshold,
        }
    }
}

/// World generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// World seed
    pub seed: u32,

    // === Biome map ===
    /// Frequency of the temperature and moisture fields
    pub biome_scale: f32,
    /// Octaves of the temperature and moisture fields
    pub biome_octaves: u32,
    /// Persistence of the temperature and moisture fields
    pub biome_persistence: f32,
    /// Origin offset of the moisture field relative to temperature
    pub moisture_offset: f32,

    // === Terrain ===
    /// Frequency of the per-cell detail noise
    pub detail_scale: f32,
    /// Detail noise at or above this picks the biome's secondary tile
    pub secondary_threshold: f32,
    /// Frequency of the water-body field
    pub water_scale: f32,
    /// Octaves of the water-body field
    pub water_octaves: u32,
    /// Persistence of the water-body field
    pub water_persistence: f32,
    /// Water-body noise must be below this for a cell to flood
    pub water_threshold: f32,

    // === Decorations ===
    /// Tree clustering field
    pub tree_layer: ClusterLayer,
    /// Rock clustering field
    pub rock_layer: ClusterLayer,
    /// Bush clustering field
    pub bush_layer: ClusterLayer,
    /// Octaves shared by the clustering fields
    pub decoration_octaves: u32,
    /// Persistence shared by the clustering fields
    pub decoration_persistence: f32,
    /// Chance that a water cell gets a pond decoration
    pub pond_chance: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,

            biome_scale: 0.05,
            biome_octaves: 3,
            biome_persistence: 0.5,
            moisture_offset: 1000.0,

            detail_scale: 0.15,
            secondary_threshold: 0.75,
            water_scale: 0.08,
            water_octaves: 3,
            water_persistence: 0.6,
            water_threshold: 0.35,

            tree_layer: ClusterLayer::new(500.0, 0.20, 0.55),
            rock_layer: ClusterLayer::new(1500.0, 0.22, 0.58),
            bush_layer: ClusterLayer::new(2500.0, 0.25, 0.60),
            decoration_octaves: 2,
            decoration_persistence: 0.4,
            pond_chance: 0.03,
        }
    }
}

impl GenerationConfig {
    /// Creates a default config with the given seed.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Checks that every parameter lies in its usable range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_values = [
            ("secondary_threshold", self.secondary_threshold),
            ("water_threshold", self.water_threshold),
            ("tree_layer.threshold", self.tree_layer.threshold),
            ("rock_layer.threshold", self.rock_layer.threshold),
            ("bush_layer.threshold", self.bush_layer.threshold),
            ("pond_chance", self.pond_chance),
        ];
        for (field, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is not within [0, 1]")));
            }
        }

        let scales = [
            ("biome_scale", self.biome_scale),
            ("detail_scale", self.detail_scale),
            ("water_scale", self.water_scale),
            ("tree_layer.scale", self.tree_layer.scale),
            ("rock_layer.scale", self.rock_layer.scale),
            ("bush_layer.scale", self.bush_layer.scale),
        ];
        for (field, value) in scales {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("{value} must be positive")));
            }
        }

        let persistences = [
            ("biome_persistence", self.biome_persistence),
            ("water_persistence", self.water_persistence),
            ("decoration_persistence", self.decoration_persistence),
        ];
        for (field, value) in persistences {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid(field, format!("{value} is not within (0, 1]")));
            }
        }

        let octaves = [
            ("biome_octaves", self.biome_octaves),
            ("water_octaves", self.water_octaves),
            ("decoration_octaves", self.decoration_octaves),
        ];
        for (field, value) in octaves {
            if value == 0 {
                return Err(invalid(field, "at least one octave is required".into()));
            }
        }

        let offsets = [
            ("moisture_offset", self.moisture_offset),
            ("tree_layer.offset", self.tree_layer.offset),
            ("rock_layer.offset", self.rock_layer.offset),
            ("bush_layer.offset", self.bush_layer.offset),
        ];
        for (field, value) in offsets {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} must be finite")));
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
