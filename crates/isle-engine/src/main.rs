//! # Isle Engine
//!
//! Headless entry point for Project Isle, a procedural isometric world
//! generator.
//!
//! This crate ties together all subsystems:
//! - Kernel: noise, isometric projection and the view camera
//! - World: biome, terrain and decoration synthesis
//! - Gameplay: buildings, movement and gathering

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod world;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EngineConfig;
use crate::world::WorldSession;

/// Main entry point.
///
/// Takes an optional config file path as the first argument; otherwise the
/// platform config directory is used, and seeded with defaults on first run.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("isle=info".parse()?))
        .init();

    info!("Project Isle starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load_or_create(),
    };
    config.validate();

    let mut session = WorldSession::from_config(&config)?;
    session.summary().log();

    let (width, height) = session.camera().viewport_size;
    let center = glam::Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    if let Some((coord, tile_type, tag)) = session.describe_pixel(center) {
        info!(
            "View centered on ({}, {}): {} {}",
            coord.x,
            coord.y,
            tile_type,
            if tag.is_empty() { "(bare)" } else { tag.as_str() }
        );
    }
    info!("{} decorations in view", session.visible_decorations().len());

    match session.settle_starting_house() {
        Some(anchor) => info!("Starting house placed at ({}, {})", anchor.x, anchor.y),
        None => info!("No room for a starting house"),
    }
    info!(
        "{} buildings standing in world {}",
        session.buildings().buildings().len(),
        session.world().seed()
    );
    let player = session.player().tile();
    info!("Player spawned at ({}, {})", player.x, player.y);

    info!("Project Isle shutdown complete");
    Ok(())
}
