//! World bootstrap from engine configuration.
//!
//! Builds and generates the world, frames it with a camera centered on the
//! middle tile, and reports what was generated.

use glam::Vec2;
use isle_common::{GridCoord, IsleResult, TileSize};
use isle_gameplay::{BuildingSystem, BuildingType, Player};
use isle_kernel::{sort_back_to_front, Camera};
use isle_world::{BiomeType, Decoration, TileType, World};
use tracing::{debug, info};

use crate::config::EngineConfig;

/// Summary statistics for a generated world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSummary {
    /// World seed
    pub seed: u32,
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Cells per biome
    pub biomes: [(BiomeType, usize); 5],
    /// Cells per tile type
    pub tile_types: [(TileType, usize); 6],
    /// Decorated cells
    pub decorations: usize,
    /// Cells holding a gatherable resource
    pub resources: usize,
}

impl WorldSummary {
    /// Collects statistics from a world.
    #[must_use]
    pub fn from_world(world: &World) -> Self {
        Self {
            seed: world.seed(),
            width: world.width(),
            height: world.height(),
            biomes: world.biome_counts(),
            tile_types: world.tile_type_counts(),
            decorations: world.tiles().filter(|t| t.decoration().is_some()).count(),
            resources: world.tiles().filter(|t| t.has_resource()).count(),
        }
    }

    /// Writes the summary to the log.
    pub fn log(&self) {
        info!(
            "World {}x{} seed={}: {} decorations, {} resources",
            self.width, self.height, self.seed, self.decorations, self.resources
        );
        for (biome, count) in self.biomes {
            info!("  {:<10} {:>6} cells", biome.name(), count);
        }
        for (tile_type, count) in self.tile_types.iter().filter(|(_, n)| *n > 0) {
            debug!("  {:<10} {:>6} tiles", tile_type.name(), count);
        }
    }
}

/// A generated world with its view and game layer.
#[derive(Debug)]
pub struct WorldSession {
    world: World,
    camera: Camera,
    tile_size: TileSize,
    buildings: BuildingSystem,
    player: Player,
}

impl WorldSession {
    /// Builds and generates a world from engine config.
    pub fn from_config(config: &EngineConfig) -> IsleResult<Self> {
        let tile_size = config.tile_size()?;
        let generation = config.resolved_generation();
        info!("Initializing world with seed: {}", generation.seed);

        let mut world = World::with_config(config.world_width, config.world_height, generation)?;
        world.generate()?;

        let center = GridCoord::new(config.world_width / 2, config.world_height / 2);
        let mut camera = Camera::new(config.viewport_width, config.viewport_height);
        camera.set_zoom(config.camera_zoom);
        camera.center_on_tile(center, tile_size);

        let player = Player::new(Vec2::new(center.x as f32, center.y as f32));

        Ok(Self {
            world,
            camera,
            tile_size,
            buildings: BuildingSystem::new(),
            player,
        })
    }

    /// The generated world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The view camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Placed buildings.
    #[must_use]
    pub const fn buildings(&self) -> &BuildingSystem {
        &self.buildings
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Summary statistics of the world.
    #[must_use]
    pub fn summary(&self) -> WorldSummary {
        WorldSummary::from_world(&self.world)
    }

    /// Decorations whose tile is inside the viewport, in draw order.
    #[must_use]
    pub fn visible_decorations(&self) -> Vec<(GridCoord, Decoration)> {
        let mut visible: Vec<_> = self
            .world
            .tiles()
            .filter_map(|tile| tile.decoration().map(|d| (tile.coord(), d)))
            .filter(|(coord, _)| {
                let screen = self.camera.tile_screen_position(*coord, self.tile_size);
                let (w, h) = self.camera.viewport_size;
                screen.x >= 0.0 && screen.y >= 0.0 && screen.x <= w as f32 && screen.y <= h as f32
            })
            .collect();
        sort_back_to_front(&mut visible, |(coord, _)| *coord);
        visible
    }

    /// Places a house on the free site nearest the world center.
    ///
    /// Searches rings of growing radius around the center. Returns the
    /// anchor, or `None` when no site fits.
    pub fn settle_starting_house(&mut self) -> Option<GridCoord> {
        let center = GridCoord::new(self.world.width() as i32 / 2, self.world.height() as i32 / 2);
        let max_radius = self.world.width().max(self.world.height()) as i32;

        for radius in 0..=max_radius {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let anchor = center.offset(dx, dy);
                    if self.buildings.can_place(&self.world, BuildingType::House, anchor) {
                        return self
                            .buildings
                            .place(&mut self.world, BuildingType::House, anchor)
                            .ok()
                            .map(|b| b.anchor);
                    }
                }
            }
        }
        None
    }

    /// Tile under a viewport pixel, as `(coord, type, decoration tag)`.
    #[must_use]
    pub fn describe_pixel(&self, screen: Vec2) -> Option<(GridCoord, TileType, String)> {
        self.world
            .tile_at_screen(screen, &self.camera, self.tile_size)
            .map(|tile| (tile.coord(), tile.tile_type(), tile.decoration_tag()))
    }
}
