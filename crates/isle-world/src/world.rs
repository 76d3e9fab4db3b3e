//! The world grid and its one-shot generation pipeline.

use std::time::Instant;

use fastrand::Rng;
use glam::Vec2;
use isle_common::{GridCoord, TileSize, WorldError};
use isle_kernel::{Camera, NoiseField};
use tracing::{debug, info};

use crate::biome::{synthesize_biome_map, Biome, BiomeType};
use crate::config::GenerationConfig;
use crate::decoration::{DecorationPlacer, ResourceYield};
use crate::terrain::TerrainSynthesizer;
use crate::tile::{Tile, TileType, TILE_VARIATIONS};

/// A fixed-size isometric world.
///
/// Tiles and biomes are stored row-major, indexed by `y * width + x`. Every
/// positional query goes through [`World::is_valid_position`] and answers
/// `None` or `false` outside the grid.
#[derive(Debug, Clone)]
pub struct World {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    biomes: Vec<BiomeType>,
    noise: NoiseField,
    rng: Rng,
    config: GenerationConfig,
    generated: bool,
}

impl World {
    /// Creates an ungenerated world with a time-based seed.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        Self::with_seed(width, height, random_seed())
    }

    /// Creates an ungenerated world with default tuning and the given seed.
    pub fn with_seed(width: i32, height: i32, seed: u32) -> Result<Self, WorldError> {
        Self::with_config(width, height, GenerationConfig::with_seed(seed))
    }

    /// Creates an ungenerated world from a full generation config.
    pub fn with_config(
        width: i32,
        height: i32,
        config: GenerationConfig,
    ) -> Result<Self, WorldError> {
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(WorldError::InvalidDimensions { width, height });
        };
        if w == 0 || h == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        config.validate()?;

        let mut rng = Rng::with_seed(u64::from(config.seed));
        let tiles = (0..w as usize * h as usize)
            .map(|index| {
                Tile::new(
                    GridCoord::from_index(index, w),
                    rng.u8(0..TILE_VARIATIONS),
                )
            })
            .collect();

        debug!("Created {}x{} world with seed {}", w, h, config.seed);

        Ok(Self {
            width: w,
            height: h,
            tiles,
            biomes: vec![BiomeType::default(); w as usize * h as usize],
            noise: NoiseField::new(config.seed),
            rng,
            config,
            generated: false,
        })
    }

    /// Runs biome, terrain and decoration synthesis in that order.
    ///
    /// Generation happens once per world; a second call is refused.
    pub fn generate(&mut self) -> Result<(), WorldError> {
        if self.generated {
            return Err(WorldError::AlreadyGenerated);
        }
        let start = Instant::now();

        self.biomes = synthesize_biome_map(&self.noise, &self.config, self.width, self.height);
        debug!("Biome map synthesized");

        let terrain = TerrainSynthesizer::new(&self.noise, &self.config);
        for (tile, biome) in self.tiles.iter_mut().zip(&self.biomes) {
            let coord = tile.coord();
            let tile_type = terrain.tile_type_at(coord.x, coord.y, Biome::new(*biome), &mut self.rng);
            tile.set_type(tile_type);
        }
        debug!("Terrain synthesized");

        let placer = DecorationPlacer::new(&self.noise, &self.config);
        for (tile, biome) in self.tiles.iter_mut().zip(&self.biomes) {
            placer.decorate(tile, Biome::new(*biome), &mut self.rng);
        }

        self.generated = true;
        let decorated = self.tiles.iter().filter(|t| t.decoration().is_some()).count();
        info!(
            "Generated {}x{} world (seed {}) with {} decorations in {:.2}ms",
            self.width,
            self.height,
            self.config.seed,
            decorated,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    /// Whether [`World::generate`] has run.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.generated
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// World seed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.config.seed
    }

    /// Generation config in use.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Noise field shared by every generation phase.
    #[must_use]
    pub const fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Whether `(x, y)` lies inside the grid.
    ///
    /// Every coordinate accessor checks bounds here before indexing.
    #[must_use]
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        GridCoord::new(x, y).to_index(self.width, self.height).is_some()
    }

    /// Row-major offset of an in-bounds cell.
    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Tile at `(x, y)`.
    #[must_use]
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if !self.is_valid_position(x, y) {
            return None;
        }
        self.tiles.get(self.offset(x, y))
    }

    /// Tile at `(x, y)`, or [`WorldError::OutOfBounds`].
    pub fn try_tile(&self, x: i32, y: i32) -> Result<&Tile, WorldError> {
        self.tile(x, y).ok_or(WorldError::OutOfBounds { x, y })
    }

    pub(crate) fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if !self.is_valid_position(x, y) {
            return None;
        }
        let offset = self.offset(x, y);
        self.tiles.get_mut(offset)
    }

    /// Biome at `(x, y)`.
    #[must_use]
    pub fn biome_at(&self, x: i32, y: i32) -> Option<BiomeType> {
        if !self.is_valid_position(x, y) {
            return None;
        }
        self.biomes.get(self.offset(x, y)).copied()
    }

    /// Marks a tile occupied or free. Returns `false` outside the grid.
    pub fn set_occupied(&mut self, x: i32, y: i32, occupied: bool) -> bool {
        match self.tile_mut(x, y) {
            Some(tile) => {
                tile.set_occupied(occupied);
                true
            }
            None => false,
        }
    }

    /// Removes a gatherable decoration and returns what it yields.
    pub fn gather_resource(&mut self, x: i32, y: i32) -> Option<ResourceYield> {
        let tile = self.tile_mut(x, y)?;
        if !tile.has_resource() {
            return None;
        }
        let decoration = tile.take_decoration()?;
        let resource = decoration.resource_yield();
        debug!("Gathered {} at ({}, {})", decoration, x, y);
        resource
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Number of cells per biome.
    #[must_use]
    pub fn biome_counts(&self) -> [(BiomeType, usize); 5] {
        BiomeType::ALL.map(|biome| (biome, self.biomes.iter().filter(|b| **b == biome).count()))
    }

    /// Number of cells per tile type.
    #[must_use]
    pub fn tile_type_counts(&self) -> [(TileType, usize); 6] {
        TileType::ALL.map(|tile_type| {
            let count = self.tiles.iter().filter(|t| t.tile_type() == tile_type).count();
            (tile_type, count)
        })
    }

    /// Tile under a viewport pixel.
    #[must_use]
    pub fn tile_at_screen(&self, screen: Vec2, camera: &Camera, tile_size: TileSize) -> Option<&Tile> {
        let coord = camera.pick_tile(screen, tile_size);
        self.tile(coord.x, coord.y)
    }
}

/// Seed derived from the system clock.
#[must_use]
pub fn random_seed() -> u32 {
    use std::time::SystemTime;
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::Decoration;

    fn generated(seed: u32) -> World {
        let mut world = World::with_seed(30, 30, seed).expect("valid world");
        world.generate().expect("first generation");
        world
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert_eq!(
            World::with_seed(0, 10, 1).err(),
            Some(WorldError::InvalidDimensions { width: 0, height: 10 })
        );
        assert!(World::with_seed(10, -3, 1).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GenerationConfig::with_seed(1);
        config.pond_chance = 2.0;
        assert!(matches!(
            World::with_config(5, 5, config),
            Err(WorldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_generate_twice_is_refused() {
        let mut world = generated(7);
        assert!(world.is_generated());
        assert_eq!(world.generate(), Err(WorldError::AlreadyGenerated));
    }

    #[test]
    fn test_variations_in_range() {
        let world = World::with_seed(12, 12, 3).expect("valid world");
        assert!(world.tiles().all(|t| t.variation() < TILE_VARIATIONS));
        assert!(!world.is_generated());
    }

    #[test]
    fn test_tile_coords_match_index() {
        let world = World::with_seed(7, 5, 3).expect("valid world");
        let tile = world.tile(6, 4).expect("corner tile");
        assert_eq!(tile.coord(), GridCoord::new(6, 4));
        assert!(world.tile(7, 4).is_none());
        assert!(world.try_tile(-1, 0).is_err());
    }

    #[test]
    fn test_accessors_agree_with_bounds_check() {
        let mut world = World::with_seed(7, 5, 3).expect("valid world");
        for y in -2..8 {
            for x in -2..10 {
                let valid = world.is_valid_position(x, y);
                assert_eq!(valid, (0..7).contains(&x) && (0..5).contains(&y));
                assert_eq!(world.tile(x, y).is_some(), valid);
                assert_eq!(world.biome_at(x, y).is_some(), valid);
                assert_eq!(world.try_tile(x, y).is_ok(), valid);
                assert_eq!(world.tile_mut(x, y).is_some(), valid);
                if valid {
                    assert_eq!(world.tile(x, y).map(Tile::coord), Some(GridCoord::new(x, y)));
                }
            }
        }
        assert!(!world.is_valid_position(i32::MAX, 0));
        assert!(!world.is_valid_position(0, i32::MIN));
    }

    #[test]
    fn test_set_occupied_out_of_bounds() {
        let mut world = generated(11);
        assert!(!world.set_occupied(30, 0, true));
        assert!(world.set_occupied(29, 29, true));
        assert!(world.tile(29, 29).is_some_and(Tile::is_occupied));
    }

    #[test]
    fn test_gather_resource_clears_decoration() {
        let mut world = World::with_seed(4, 4, 1).expect("valid world");
        world
            .tile_mut(1, 2)
            .expect("in bounds")
            .set_decoration(Decoration::Rocks(2));
        world.tile_mut(2, 2).expect("in bounds").set_decoration(Decoration::Bush(1));

        assert_eq!(world.gather_resource(1, 2), Some(ResourceYield::Stone));
        assert!(world.tile(1, 2).is_some_and(|t| t.decoration().is_none() && !t.has_resource()));
        assert_eq!(world.gather_resource(1, 2), None);

        assert_eq!(world.gather_resource(2, 2), None);
        assert_eq!(world.tile(2, 2).and_then(Tile::decoration), Some(Decoration::Bush(1)));
        assert_eq!(world.gather_resource(-5, 0), None);
    }

    #[test]
    fn test_counts_cover_every_cell() {
        let world = generated(42);
        let biomes: usize = world.biome_counts().iter().map(|(_, n)| n).sum();
        let tiles: usize = world.tile_type_counts().iter().map(|(_, n)| n).sum();
        assert_eq!(biomes, 900);
        assert_eq!(tiles, 900);
    }

    #[test]
    fn test_tile_at_screen() {
        let world = generated(42);
        let tile_size = TileSize::DEFAULT;
        let mut camera = Camera::new(800, 600);
        camera.center_on_tile(GridCoord::new(15, 15), tile_size);

        let picked = world.tile_at_screen(Vec2::new(400.0, 300.0), &camera, tile_size);
        assert_eq!(picked.map(Tile::coord), Some(GridCoord::new(15, 15)));

        camera.center_on_tile(GridCoord::new(-20, -20), tile_size);
        assert!(world.tile_at_screen(Vec2::new(400.0, 300.0), &camera, tile_size).is_none());
    }
}
