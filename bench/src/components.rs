//! Common component types used across benchmarks.

use rusty_ecs::ecs::{Error, World};
use rusty_ecs_macros::Component;

/// 3D position component (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 3D velocity component (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Remaining and total lifetime in seconds.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

/// RGBA color (16 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Register every component type above except the tags.
pub fn register_all(world: &mut World) -> Result<(), Error> {
    world.register_component::<Position>()?;
    world.register_component::<Velocity>()?;
    world.register_component::<Lifetime>()?;
    world.register_component::<Color>()?;
    Ok(())
}
