//! Moves a handful of entities around and retires them when their fuel runs out.
//!
//! Run with `cargo run --example mover`.

use log::LevelFilter;
use rusty_ecs::{
    ecs::{Context, Error, System, World},
    logger,
};
use rusty_ecs_macros::Component;

#[derive(Component, Debug, Clone, Copy, Default)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Component, Debug, Clone, Copy, Default)]
struct Velocity {
    dx: f32,
    dy: f32,
}

#[derive(Component, Debug, Clone, Copy)]
struct Fuel(u32);

#[derive(Default)]
struct Mover;

impl System for Mover {
    fn update(&mut self, ctx: &mut Context<'_>, delta: f32) {
        for entity in ctx.entities() {
            let Ok(&velocity) = ctx.get::<Velocity>(entity) else {
                continue;
            };
            if let Ok(position) = ctx.get_mut::<Position>(entity) {
                position.x += velocity.dx * delta;
                position.y += velocity.dy * delta;
            }
            if let Ok(fuel) = ctx.get_mut::<Fuel>(entity) {
                fuel.0 = fuel.0.saturating_sub(1);
                if fuel.0 == 0 {
                    ctx.commands().remove_component::<Velocity>(entity);
                }
            }
        }
    }
}

fn main() -> Result<(), Error> {
    let logs = logger::init(LevelFilter::Debug).ok();

    let mut world = World::new();
    world.register_component::<Position>()?;
    world.register_component::<Velocity>()?;
    world.register_component::<Fuel>()?;

    let mover = world.register_system::<Mover>()?;
    let required = world.signature_of::<(Position, Velocity)>()?;
    world.set_system_signature::<Mover>(required)?;

    for i in 0..4u8 {
        let entity = world.create_entity()?;
        world.add_component(entity, Position::default())?;
        world.add_component(
            entity,
            Velocity {
                dx: f32::from(i) + 1.0,
                dy: 1.0,
            },
        )?;
        world.add_component(entity, Fuel(u32::from(i) + 2))?;
    }

    for tick in 0..6 {
        world.run_system(mover, 0.5)?;
        let moving = world.entities_of(mover).map_or(0, |interest| interest.len());
        println!("tick {tick}: {moving} moving");
    }

    for (entity, position) in world.store::<Position>()?.iter() {
        println!("{entity} came to rest at ({:.1}, {:.1})", position.x, position.y);
    }

    if let Some(logs) = logs {
        for message in logs.try_iter() {
            println!("[{}] {}", message.level, message.message);
        }
    }
    Ok(())
}
