//! 2D camera for viewing the isometric world.
//!
//! The camera is a viewport translation (plus zoom) applied on top of the
//! isometric projection. Screen space here means viewport pixels with the
//! origin at the top-left corner; world space means projected isometric
//! pixels as produced by [`crate::isometric`].

use glam::Vec2;
use isle_common::{GridCoord, TileSize};

use crate::isometric;

/// Minimum zoom level (zoomed out).
pub const MIN_ZOOM: f32 = 0.25;

/// Maximum zoom level (zoomed in).
pub const MAX_ZOOM: f32 = 20.0;

/// Default zoom level.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// 2D camera for viewing the world.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world pixels (center of view).
    pub position: Vec2,
    /// Zoom level (1.0 = 1:1 pixel mapping).
    pub zoom: f32,
    /// Viewport size in pixels (width, height).
    pub viewport_size: (u32, u32),
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            viewport_size: (1280, 720),
        }
    }
}

impl Camera {
    /// Creates a new camera with the given viewport size.
    #[must_use]
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            viewport_size: (viewport_width, viewport_height),
        }
    }

    /// Move camera by delta in world pixels.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Zoom in/out by factor (clamped to reasonable range).
    ///
    /// Factor > 1.0 zooms in, < 1.0 zooms out.
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Set absolute zoom level (clamped).
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Center camera on world position.
    pub fn center_on(&mut self, world: Vec2) {
        self.position = world;
    }

    /// Center camera on the projected position of a grid cell.
    pub fn center_on_tile(&mut self, coord: GridCoord, tile: TileSize) {
        self.position = isometric::grid_to_screen(coord, tile);
    }

    /// Set the viewport size.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_size = (width, height);
    }

    fn half_viewport(&self) -> Vec2 {
        Vec2::new(
            self.viewport_size.0 as f32 / 2.0,
            self.viewport_size.1 as f32 / 2.0,
        )
    }

    /// Convert viewport pixels to world pixels.
    ///
    /// Subtracts half the viewport, undoes zoom, then adds the camera position.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.position + (screen - self.half_viewport()) / self.zoom
    }

    /// Convert world pixels to viewport pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.position) * self.zoom + self.half_viewport()
    }

    /// Grid cell under a viewport pixel (mouse picking).
    #[must_use]
    pub fn pick_tile(&self, screen: Vec2, tile: TileSize) -> GridCoord {
        isometric::screen_to_grid(self.screen_to_world(screen), tile)
    }

    /// Viewport position at which a grid cell is drawn.
    #[must_use]
    pub fn tile_screen_position(&self, coord: GridCoord, tile: TileSize) -> Vec2 {
        self.world_to_screen(isometric::grid_to_screen(coord, tile))
    }

    /// Get visible world bounds as (min, max) corners.
    #[must_use]
    pub fn visible_bounds(&self) -> (Vec2, Vec2) {
        let half = self.half_viewport() / self.zoom;
        (self.position - half, self.position + half)
    }

    /// Check if a world point is visible on screen.
    #[must_use]
    pub fn is_visible(&self, world: Vec2) -> bool {
        let (min, max) = self.visible_bounds();
        world.x >= min.x && world.x <= max.x && world.y >= min.y && world.y <= max.y
    }

    /// Smoothly interpolate camera toward target position.
    pub fn lerp_to(&mut self, target: Vec2, t: f32) {
        let t = t.clamp(0.0, 1.0);
        self.position = self.position.lerp(target, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(1920, 1080);
        assert_eq!(camera.viewport_size, (1920, 1080));
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f32::EPSILON);
    }

    #[test]
    fn test_camera_zoom_clamp() {
        let mut camera = Camera::default();

        camera.set_zoom(100.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f32::EPSILON);

        camera.set_zoom(0.01);
        assert!((camera.zoom - MIN_ZOOM).abs() < f32::EPSILON);

        camera.set_zoom(1.0);
        camera.zoom_by(2.0);
        assert!((camera.zoom - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_screen_to_world_center() {
        let mut camera = Camera::new(800, 600);
        camera.center_on(Vec2::new(100.0, 50.0));
        // Screen center maps to the camera position
        assert_eq!(camera.screen_to_world(Vec2::new(400.0, 300.0)), Vec2::new(100.0, 50.0));
        // Top-left corner is half a viewport away
        assert_eq!(camera.screen_to_world(Vec2::ZERO), Vec2::new(-300.0, -250.0));
    }

    #[test]
    fn test_screen_world_roundtrip() {
        let mut camera = Camera::new(1280, 720);
        camera.center_on(Vec2::new(1000.0, 500.0));
        camera.set_zoom(2.0);

        let screen = Vec2::new(200.0, 150.0);
        let back = camera.world_to_screen(camera.screen_to_world(screen));
        assert!((back - screen).length() < 0.01);
    }

    #[test]
    fn test_pick_tile_through_camera() {
        let tile = TileSize::DEFAULT;
        let mut camera = Camera::new(800, 600);
        camera.center_on_tile(GridCoord::new(15, 15), tile);

        // The viewport center is the tile the camera is centered on
        assert_eq!(camera.pick_tile(Vec2::new(400.0, 300.0), tile), GridCoord::new(15, 15));

        let target = GridCoord::new(12, 17);
        let pixel = camera.tile_screen_position(target, tile);
        assert_eq!(camera.pick_tile(pixel, tile), target);
    }

    #[test]
    fn test_visibility() {
        let camera = Camera::new(800, 600);
        let (min, max) = camera.visible_bounds();
        assert_eq!(min, Vec2::new(-400.0, -300.0));
        assert_eq!(max, Vec2::new(400.0, 300.0));
        assert!(camera.is_visible(Vec2::new(100.0, 100.0)));
        assert!(!camera.is_visible(Vec2::new(1000.0, 0.0)));
    }

    #[test]
    fn test_lerp_to() {
        let mut camera = Camera::default();
        camera.lerp_to(Vec2::new(100.0, 100.0), 0.5);
        assert_eq!(camera.position, Vec2::new(50.0, 50.0));
    }
}
