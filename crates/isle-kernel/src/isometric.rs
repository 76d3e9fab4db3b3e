//! Isometric projection between grid space and screen space.
//!
//! Grid axes map onto the two diagonals of the screen: moving +x steps
//! right-down by half a tile, moving +y steps left-down by half a tile.
//! The screen origin is the top corner of tile (0, 0). All functions here are
//! pure; viewport translation lives in [`crate::camera`].

use glam::Vec2;
use isle_common::{GridCoord, TileSize};

/// Projects an integer grid coordinate to screen pixels.
///
/// `sx = (gx - gy) * w/2`, `sy = (gx + gy) * h/2`.
#[must_use]
pub fn grid_to_screen(coord: GridCoord, tile: TileSize) -> Vec2 {
    world_to_screen(Vec2::new(coord.x as f32, coord.y as f32), tile)
}

/// Projects a continuous grid position (an entity between tiles) to screen pixels.
///
/// Same formula as [`grid_to_screen`].
#[must_use]
pub fn world_to_screen(pos: Vec2, tile: TileSize) -> Vec2 {
    Vec2::new(
        (pos.x - pos.y) * tile.half_width(),
        (pos.x + pos.y) * tile.half_height(),
    )
}

/// Unprojects screen pixels to a continuous grid position.
///
/// Exact algebraic inverse of [`world_to_screen`].
#[must_use]
pub fn screen_to_world(screen: Vec2, tile: TileSize) -> Vec2 {
    let across = screen.x / tile.half_width();
    let down = screen.y / tile.half_height();
    Vec2::new((across + down) / 2.0, (down - across) / 2.0)
}

/// Unprojects screen pixels to the nearest grid coordinate.
///
/// For every integer grid coordinate `c`,
/// `screen_to_grid(grid_to_screen(c, t), t) == c`.
#[must_use]
pub fn screen_to_grid(screen: Vec2, tile: TileSize) -> GridCoord {
    let world = screen_to_world(screen, tile);
    GridCoord::new(world.x.round() as i32, world.y.round() as i32)
}

/// Unprojects screen pixels to the grid cell whose span contains the point.
///
/// Floors instead of rounding, so the tile origin of each cell owns the unit
/// square in front of it.
#[must_use]
pub fn screen_to_tile(screen: Vec2, tile: TileSize) -> GridCoord {
    let world = screen_to_world(screen, tile);
    GridCoord::new(world.x.floor() as i32, world.y.floor() as i32)
}

/// Draw-order key: larger values are nearer the viewer and draw later.
#[must_use]
pub const fn render_order(coord: GridCoord) -> i32 {
    coord.x + coord.y
}

/// Sorts items back to front by the render order of their grid position.
///
/// The sort is stable: items on the same diagonal keep their relative order.
pub fn sort_back_to_front<T, F>(items: &mut [T], mut position: F)
where
    F: FnMut(&T) -> GridCoord,
{
    items.sort_by_key(|item| render_order(position(item)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tile(w: u32, h: u32) -> TileSize {
        TileSize::new(w, h).expect("valid tile size")
    }

    #[test]
    fn test_grid_to_screen_origin() {
        let screen = grid_to_screen(GridCoord::new(0, 0), TileSize::DEFAULT);
        assert_eq!(screen, Vec2::ZERO);
    }

    #[test]
    fn test_grid_to_screen_center_of_30x30() {
        let screen = grid_to_screen(GridCoord::new(15, 15), tile(64, 32));
        assert_eq!(screen, Vec2::new(0.0, 480.0));
    }

    #[test]
    fn test_axis_directions() {
        let t = tile(64, 32);
        assert_eq!(grid_to_screen(GridCoord::new(1, 0), t), Vec2::new(32.0, 16.0));
        assert_eq!(grid_to_screen(GridCoord::new(0, 1), t), Vec2::new(-32.0, 16.0));
    }

    #[test]
    fn test_continuous_matches_integer() {
        let t = tile(64, 32);
        let mid = world_to_screen(Vec2::new(2.5, 1.5), t);
        assert_eq!(mid, Vec2::new(32.0, 64.0));
        let back = screen_to_world(mid, t);
        assert!((back - Vec2::new(2.5, 1.5)).length() < 1e-5);
    }

    #[test]
    fn test_screen_to_grid_rounds_to_nearest() {
        let t = tile(64, 32);
        // A few pixels off the projected point of (3, 4) still picks (3, 4)
        let screen = grid_to_screen(GridCoord::new(3, 4), t) + Vec2::new(5.0, 3.0);
        assert_eq!(screen_to_grid(screen, t), GridCoord::new(3, 4));
    }

    #[test]
    fn test_screen_to_tile_floors() {
        let t = tile(64, 32);
        let screen = world_to_screen(Vec2::new(3.9, 4.1), t);
        assert_eq!(screen_to_tile(screen, t), GridCoord::new(3, 4));
        let negative = world_to_screen(Vec2::new(-0.2, 0.5), t);
        assert_eq!(screen_to_tile(negative, t), GridCoord::new(-1, 0));
    }

    #[test]
    fn test_render_order_diagonal() {
        assert_eq!(render_order(GridCoord::new(0, 0)), 0);
        assert_eq!(render_order(GridCoord::new(3, 4)), 7);
        assert_eq!(render_order(GridCoord::new(4, 3)), 7);
    }

    #[test]
    fn test_sort_back_to_front() {
        let mut items = vec![
            ("near", GridCoord::new(5, 5)),
            ("far", GridCoord::new(0, 0)),
            ("mid_a", GridCoord::new(2, 1)),
            ("mid_b", GridCoord::new(1, 2)),
        ];
        sort_back_to_front(&mut items, |(_, c)| *c);
        let names: Vec<_> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["far", "mid_a", "mid_b", "near"]);
    }

    proptest! {
        #[test]
        fn prop_projection_roundtrip(
            gx in -10_000i32..10_000,
            gy in -10_000i32..10_000,
            w in 1u32..512,
            h in 1u32..512,
        ) {
            let t = tile(w, h);
            let coord = GridCoord::new(gx, gy);
            prop_assert_eq!(screen_to_grid(grid_to_screen(coord, t), t), coord);
        }

        #[test]
        fn prop_render_order_monotonic(
            ax in -1000i32..1000, ay in -1000i32..1000,
            bx in -1000i32..1000, by in -1000i32..1000,
        ) {
            let a = GridCoord::new(ax, ay);
            let b = GridCoord::new(bx, by);
            if ax + ay < bx + by {
                prop_assert!(render_order(a) < render_order(b));
            }
        }
    }
}
