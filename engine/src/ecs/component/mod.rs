//! Component management for the ECS.
//!
//! Components are the typed data payloads attached to entities. Each component type is
//! registered once per world and assigned a small, stable [`Id`] that selects both its bit in a
//! [`Signature`] and its [`Store`].
//!
//! ## Architecture
//!
//! - [`Component`]: The trait that all component types must implement
//! - [`Id`]: The identifier assigned to a registered component type
//! - [`Store`]: Dense, swap-remove storage for the values of one component type
//! - [`Registry`]: Type registration and ownership of every store
//! - [`IntoSignature`]: Conversion of component types (and tuples of them) into a signature
//!
//! ## Usage
//!
//! ```ignore
//! use rusty_ecs::ecs::component::{Component, Registry};
//!
//! #[derive(Component)]
//! struct Position { x: f32, y: f32 }
//!
//! let mut registry = Registry::new(1024);
//! let pos_id = registry.register::<Position>()?;
//! ```

mod registry;
mod store;

pub use registry::Registry;
pub use store::Store;

use crate::{
    all_tuples,
    ecs::{error::Result, signature::Signature},
};

/// A component type identifier. Assigned sequentially from zero as types are registered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new component Id from a raw u32 value. Only the registry hands out ids, so
    /// every id names a registered type below the signature width.
    #[inline]
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this component if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A trait representing a component in the ECS.
///
/// At present this only sets the required trait bounds for a type to be used as a component. The
/// runtime never interprets component payloads.
pub trait Component: 'static + Sized {}

/// A type that names a set of component types, convertible to a [`Signature`] once those types
/// are registered.
pub trait IntoSignature {
    /// Build the signature using the ids assigned by `registry`.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`](crate::ecs::Error::ComponentNotRegistered) if any
    ///   named type has not been registered.
    fn into_signature(registry: &Registry) -> Result<Signature>;
}

impl IntoSignature for () {
    fn into_signature(_registry: &Registry) -> Result<Signature> {
        Ok(Signature::EMPTY)
    }
}

impl<C: Component> IntoSignature for C {
    fn into_signature(registry: &Registry) -> Result<Signature> {
        Ok(Signature::EMPTY.with(registry.id::<C>()?))
    }
}

macro_rules! tuple_signature {
    ($($name: ident),*) => {
        impl<$($name: IntoSignature),*> IntoSignature for ($($name,)*) {
            fn into_signature(registry: &Registry) -> Result<Signature> {
                let mut signature = Signature::EMPTY;
                $(
                    signature = signature | <$name>::into_signature(registry)?;
                )*
                Ok(signature)
            }
        }
    }
}

all_tuples!(tuple_signature);

#[cfg(test)]
mod tests {
    use rusty_ecs_macros::Component;

    use super::*;
    use crate::ecs::Error;

    #[derive(Component)]
    struct Position;

    #[derive(Component)]
    struct Velocity;

    #[derive(Component)]
    struct Mass;

    #[test]
    fn signature_from_single_and_tuples() {
        // Given
        let mut registry = Registry::new(16);
        let pos = registry.register::<Position>().unwrap();
        let vel = registry.register::<Velocity>().unwrap();
        let mass = registry.register::<Mass>().unwrap();

        // When
        let single = Position::into_signature(&registry).unwrap();
        let pair = <(Position, Velocity)>::into_signature(&registry).unwrap();
        let nested = <((Mass,), Velocity)>::into_signature(&registry).unwrap();

        // Then
        assert_eq!(single, Signature::EMPTY.with(pos));
        assert_eq!(pair, Signature::EMPTY.with(pos).with(vel));
        assert_eq!(nested, Signature::EMPTY.with(mass).with(vel));
        assert_eq!(<()>::into_signature(&registry).unwrap(), Signature::EMPTY);
    }

    #[test]
    fn signature_of_unregistered_type_fails() {
        // Given
        let mut registry = Registry::new(16);
        registry.register::<Position>().unwrap();

        // When
        let result = <(Position, Velocity)>::into_signature(&registry);

        // Then
        assert!(matches!(result, Err(Error::ComponentNotRegistered { .. })));
    }
}
