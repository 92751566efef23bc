//! Entity identifiers and the registry that issues them.
//!
//! An [`Entity`] is nothing but an identifier drawn from a fixed universe of
//! [`MAX_ENTITIES`] values (or the bound configured on the world). It owns no data itself: all
//! entity state lives in component stores, associated by identifier.
//!
//! The [`Registry`] hands identifiers out of a FIFO free pool, so the identifier destroyed
//! longest ago is the next one reused:
//!
//! ```rust,ignore
//! let mut registry = Registry::new(3);
//! let a = registry.create()?; // Entity(0)
//! let b = registry.create()?; // Entity(1)
//! registry.destroy(a);
//! let c = registry.create()?; // Entity(2), Entity(0) waits behind it in the pool
//! ```
//!
//! Reusing identifiers is only safe once a destroy has fully propagated through the component
//! stores and system interest sets, which is why only the world calls [`Registry::destroy`].

mod registry;

use std::fmt;

pub use registry::Registry;

/// The default bound on simultaneously live entities.
pub const MAX_ENTITIES: usize = 5000;

/// An entity in the ECS. A small, copyable identifier with no intrinsic data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Construct an entity from its raw identifier.
    #[inline]
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw identifier of this entity.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }

    /// Get the index of this entity if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<Entity> for u32 {
    #[inline]
    fn from(entity: Entity) -> Self {
        entity.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
