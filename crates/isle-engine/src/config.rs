//! Engine configuration.
//!
//! Provides world size, seed, projection and viewport settings plus the full
//! generation tuning. Configuration is loaded from a TOML file, and the
//! defaults are written out when no file exists yet.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use isle_common::{ConfigError, IsleResult, TileSize};
use isle_kernel::{MAX_ZOOM, MIN_ZOOM};
use isle_world::GenerationConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "isle.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === World Settings ===
    /// World width in tiles
    pub world_width: i32,
    /// World height in tiles
    pub world_height: i32,
    /// World seed (None = random). Overrides `generation.seed`.
    pub world_seed: Option<u32>,

    // === Projection Settings ===
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,

    // === View Settings ===
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Camera zoom level
    pub camera_zoom: f32,

    // === Generation ===
    /// Biome, terrain and decoration tuning
    pub generation: GenerationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world_width: 30,
            world_height: 30,
            world_seed: None,

            tile_width: TileSize::DEFAULT.width(),
            tile_height: TileSize::DEFAULT.height(),

            viewport_width: 1280,
            viewport_height: 720,
            camera_zoom: 1.0,

            generation: GenerationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let mut contents = String::new();
        if let Err(e) = fs::File::open(path).and_then(|mut file| file.read_to_string(&mut contents)) {
            warn!("Failed to read config file: {e}");
            return Self::default();
        }

        match toml::from_str(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Load configuration from the default file location, writing the
    /// defaults there on first run.
    pub fn load_or_create() -> Self {
        Self::load_or_create_at(Self::config_path())
    }

    /// Load configuration from `path`, writing the defaults there if the
    /// file doesn't exist yet. A failed write is logged and the defaults
    /// are still returned.
    pub fn load_or_create_at<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::default();
        match config.save_to(path) {
            Ok(()) => info!("Wrote default config to {}", path.display()),
            Err(e) => warn!("Failed to write default config: {e}"),
        }
        config
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> IsleResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path.
    fn config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(config_dir) => config_dir.join("isle").join(CONFIG_FILE),
            None => PathBuf::from(CONFIG_FILE),
        }
    }

    /// Validate and clamp configuration values to sensible ranges.
    ///
    /// Generation tuning is not clamped; it is checked when the world is built.
    pub fn validate(&mut self) {
        // World
        self.world_width = self.world_width.clamp(1, 4096);
        self.world_height = self.world_height.clamp(1, 4096);

        // Projection
        self.tile_width = self.tile_width.clamp(2, 512);
        self.tile_height = self.tile_height.clamp(1, 512);

        // View
        self.viewport_width = self.viewport_width.clamp(320, 7680);
        self.viewport_height = self.viewport_height.clamp(240, 4320);
        self.camera_zoom = self.camera_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Tile dimensions for projection.
    pub fn tile_size(&self) -> Result<TileSize, ConfigError> {
        TileSize::new(self.tile_width, self.tile_height)
    }

    /// Generation tuning with the world seed resolved.
    #[must_use]
    pub fn resolved_generation(&self) -> GenerationConfig {
        let seed = self.world_seed.unwrap_or_else(isle_world::random_seed);
        GenerationConfig {
            seed,
            ..self.generation.clone()
        }
    }
}
