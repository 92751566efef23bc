//! A small signature-based Entity Component System runtime.
//!
//! Entities are plain identifiers drawn from a fixed universe. Component values live in dense
//! per-type stores, each entity carries a [`Signature`](ecs::Signature) of the component types it
//! holds, and systems declare the signature they require. The [`World`](ecs::World) keeps all of
//! this consistent and keeps every system's interest set current.
//!
//! ```rust,ignore
//! use rusty_ecs::ecs::{World, Component, System};
//!
//! let mut world = World::new();
//! world.register_component::<Position>()?;
//! world.register_component::<Velocity>()?;
//!
//! let mover = world.register_system::<Mover>()?;
//! let required = world.signature_of::<(Position, Velocity)>()?;
//! world.set_system_signature::<Mover>(required)?;
//!
//! let entity = world.create_entity()?;
//! world.add_component(entity, Position::default())?;
//! world.add_component(entity, Velocity::default())?;
//!
//! world.run_system(mover, 1.0 / 60.0)?;
//! ```

// Lets the derive macros refer to `::rusty_ecs` from inside this crate as well.
extern crate self as rusty_ecs;

pub mod ecs;
pub mod logger;
