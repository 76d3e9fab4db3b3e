//! Walkability checks for units moving over the grid.

use isle_world::World;

/// Whether a unit may stand on `(x, y)`.
///
/// The tile must exist, have a walkable surface, be unoccupied and carry no
/// blocking decoration such as a tree or rocks.
#[must_use]
pub fn can_walk(world: &World, x: i32, y: i32) -> bool {
    world.tile(x, y).is_some_and(|tile| {
        tile.is_available() && !tile.decoration().is_some_and(|d| d.blocks_movement())
    })
}
