//! Systems and the interest sets that route entities to them.
//!
//! # Overview
//!
//! A system is a type registered once per world. Alongside the instance, the world records the
//! [`Signature`](crate::ecs::Signature) the system requires and keeps an [`Interest`] set: the
//! entities whose signature contains every required component type. The set is updated on every
//! attach, detach and destroy, so it is always current when a system runs.
//!
//! ```rust,ignore
//! use rusty_ecs::ecs::{Context, System, World};
//!
//! #[derive(Default)]
//! struct Mover;
//!
//! impl System for Mover {
//!     fn update(&mut self, ctx: &mut Context<'_>, delta: f32) {
//!         for entity in ctx.entities() {
//!             let velocity = *ctx.get::<Velocity>(entity).unwrap();
//!             let position = ctx.get_mut::<Position>(entity).unwrap();
//!             position.x += velocity.dx * delta;
//!         }
//!     }
//! }
//!
//! let mover = world.register_system::<Mover>()?;
//! world.set_system_signature::<Mover>(world.signature_of::<(Position, Velocity)>()?)?;
//! world.run_system(mover, 0.016)?;
//! ```
//!
//! # Mutation While Running
//!
//! A running system may read and write component values of any entity, but it may not change
//! which components an entity holds, or destroy it, while its interest set is being iterated.
//! Such changes are queued through [`Context::commands`] and applied by the world after
//! [`System::update`] returns.

mod command;
mod context;
mod interest;
mod registry;

use std::{fmt, marker::PhantomData};

pub use command::{Command, CommandBuffer, Commands};
pub use context::Context;
pub use interest::{Interest, Iter as InterestIter};
pub use registry::Registry;

/// A system type. One instance of each registered type lives in the world.
pub trait System: 'static {
    /// Advance the system by one tick.
    ///
    /// The default does nothing, for systems that are driven from outside the world and only
    /// read their interest set.
    fn update(&mut self, _ctx: &mut Context<'_>, _delta: f32) {}
}

/// A system identifier, assigned sequentially as system types are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new system Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this system if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A typed handle to a registered system, returned by registration.
pub struct Handle<S> {
    id: Id,
    _marker: PhantomData<fn() -> S>,
}

impl<S> Handle<S> {
    #[inline]
    pub(crate) const fn new(id: Id) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The id of the system this handle refers to.
    #[inline]
    pub const fn id(&self) -> Id {
        self.id
    }
}

impl<S> Clone for Handle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Handle<S> {}

impl<S> PartialEq for Handle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S> Eq for Handle<S> {}

impl<S> fmt::Debug for Handle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("system", &std::any::type_name::<S>())
            .field("id", &self.id)
            .finish()
    }
}
