//! End-to-end generation checks on small worlds.

use isle_common::{GridCoord, TileSize, WorldError};
use isle_kernel::grid_to_screen;
use isle_world::{Decoration, TileType, World};
use proptest::prelude::*;

fn world(width: i32, height: i32, seed: u32) -> World {
    let mut world = World::with_seed(width, height, seed).expect("valid dimensions");
    world.generate().expect("fresh world generates");
    world
}

fn snapshot(world: &World) -> Vec<(TileType, String, bool, u8)> {
    world
        .tiles()
        .map(|t| (t.tile_type(), t.decoration_tag(), t.has_resource(), t.variation()))
        .collect()
}

#[test]
fn test_seed_42_is_reproducible() {
    let a = world(30, 30, 42);
    let b = world(30, 30, 42);
    assert_eq!(snapshot(&a), snapshot(&b));

    for y in 0..30 {
        for x in 0..30 {
            assert_eq!(a.biome_at(x, y), b.biome_at(x, y));
        }
    }
}

#[test]
fn test_different_seeds_produce_different_worlds() {
    assert_ne!(snapshot(&world(30, 30, 42)), snapshot(&world(30, 30, 43)));
}

#[test]
fn test_center_of_30x30_projects_to_480() {
    let tile = TileSize::new(64, 32).expect("valid tile size");
    let screen = grid_to_screen(GridCoord::new(15, 15), tile);
    assert_eq!((screen.x, screen.y), (0.0, 480.0));
}

#[test]
fn test_bounds_safety() {
    let mut world = world(10, 10, 1);
    for (x, y) in [(-1, 0), (0, -1), (10, 0), (0, 10), (i32::MIN, i32::MAX)] {
        assert!(!world.is_valid_position(x, y));
        assert!(world.tile(x, y).is_none());
        assert!(world.biome_at(x, y).is_none());
        assert!(!world.set_occupied(x, y, true));
        assert!(world.gather_resource(x, y).is_none());
    }
    assert!(world.tile(0, 0).is_some());
    assert!(world.tile(9, 9).is_some());
}

#[test]
fn test_every_cell_generated_consistently() {
    let world = world(30, 30, 42);
    assert_eq!(world.tiles().count(), 900);
    for tile in world.tiles() {
        assert_eq!(tile.is_walkable(), tile.tile_type() != TileType::Water);
        assert!(!tile.is_occupied());
    }
}

#[test]
fn test_decorations_respect_terrain() {
    for seed in [1, 42, 777, 9001] {
        let world = world(40, 40, seed);
        for tile in world.tiles() {
            match tile.decoration() {
                Some(Decoration::Pond) => {
                    assert_eq!(tile.tile_type(), TileType::Water);
                    assert!(!tile.has_resource());
                }
                Some(Decoration::Tree(_) | Decoration::Rocks(_)) => {
                    assert!(tile.is_walkable());
                    assert!(tile.has_resource());
                }
                Some(Decoration::Bush(_)) => {
                    assert!(tile.is_walkable());
                    assert!(!tile.has_resource());
                }
                None => assert!(!tile.has_resource()),
            }
        }
    }
}

#[test]
fn test_tree_sprites_follow_tree_noise() {
    let world = world(64, 64, 42);
    let config = world.config();
    let layer = config.tree_layer;

    let mut trees = 0;
    for tile in world.tiles() {
        let Some(Decoration::Tree(index)) = tile.decoration() else {
            continue;
        };
        let coord = tile.coord();
        let n = world.noise().fractal_noise_2d(
            (coord.x as f32 + layer.offset) * layer.scale,
            (coord.y as f32 + layer.offset) * layer.scale,
            config.decoration_octaves,
            config.decoration_persistence,
        );
        assert!(n > layer.threshold, "tree at {coord:?} below threshold: {n}");
        assert_eq!(index, ((n * 20.0) as u8) % 20, "tree at {coord:?} with n = {n}");
        trees += 1;
    }
    assert!(trees > 0);
}

#[test]
fn test_decoration_tags_parse_back() {
    let world = world(40, 40, 42);
    for tile in world.tiles() {
        if let Some(decoration) = tile.decoration() {
            assert_eq!(tile.decoration_tag().parse::<Decoration>(), Ok(decoration));
        }
    }
}

#[test]
fn test_occupancy_leaves_content_untouched() {
    let mut world = world(30, 30, 42);
    let before = snapshot(&world);
    for y in 0..30 {
        for x in 0..30 {
            assert!(world.set_occupied(x, y, true));
        }
    }
    assert_eq!(snapshot(&world), before);
    assert!(world.tiles().all(|t| t.is_occupied()));
}

#[test]
fn test_second_generation_is_refused() {
    let mut world = world(8, 8, 5);
    let before = snapshot(&world);
    assert_eq!(world.generate(), Err(WorldError::AlreadyGenerated));
    assert_eq!(snapshot(&world), before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_any_seed_generates_consistent_world(
        seed in any::<u32>(),
        width in 1i32..24,
        height in 1i32..24,
    ) {
        let world = world(width, height, seed);
        prop_assert_eq!(world.tiles().count(), (width * height) as usize);
        for tile in world.tiles() {
            let coord = tile.coord();
            prop_assert!(world.is_valid_position(coord.x, coord.y));
            prop_assert!(world.biome_at(coord.x, coord.y).is_some());
            prop_assert_eq!(tile.has_resource(), tile.decoration().is_some_and(Decoration::is_resource));
            if tile.tile_type() == TileType::Water {
                prop_assert!(matches!(tile.decoration(), None | Some(Decoration::Pond)));
            }
        }
    }
}
