//! Errors reported by the ECS runtime.
//!
//! Two classes of failure exist. Schema errors (registering a type twice, using a type or system
//! that was never registered) indicate a wiring bug and are logged at `error` level when they are
//! returned. Capacity errors (the entity universe is exhausted) are a recoverable runtime
//! condition. The remaining variants describe misuse of a specific entity.
//!
//! Every operation that returns an error does so before mutating any state.

use thiserror::Error;

use crate::ecs::entity::Entity;

/// Convenience result type for ECS operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error returned by the ECS runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Every identifier in the entity universe is currently live.
    #[error("entity capacity exceeded: all {capacity} entities are live")]
    CapacityExceeded {
        /// The universe bound of the world.
        capacity: usize,
    },

    /// The component type was registered before.
    #[error("component type '{name}' is already registered")]
    ComponentAlreadyRegistered {
        /// The Rust type name of the component.
        name: &'static str,
    },

    /// The component type was used without being registered.
    #[error("component type '{name}' is not registered")]
    ComponentNotRegistered {
        /// The Rust type name of the component.
        name: &'static str,
    },

    /// Registering the component type would exceed the signature width.
    #[error("cannot register component type '{name}': at most {max} component types are supported")]
    TooManyComponentTypes {
        /// The Rust type name of the component.
        name: &'static str,
        /// The signature width.
        max: usize,
    },

    /// The system type was registered before.
    #[error("system type '{name}' is already registered")]
    SystemAlreadyRegistered {
        /// The Rust type name of the system.
        name: &'static str,
    },

    /// The system type was used without being registered.
    #[error("system type '{name}' is not registered")]
    SystemNotRegistered {
        /// The Rust type name of the system.
        name: &'static str,
    },

    /// A system was given a signature requiring no components.
    #[error("system type '{name}' cannot require an empty signature")]
    EmptySystemSignature {
        /// The Rust type name of the system.
        name: &'static str,
    },

    /// A system was given a signature naming component ids that are not registered.
    #[error("system type '{name}' requires unregistered component bits {bits:#b}")]
    UnregisteredSignatureBits {
        /// The Rust type name of the system.
        name: &'static str,
        /// The offending bits.
        bits: u32,
    },

    /// The entity is not live in the world.
    #[error("{entity} is not alive")]
    DeadEntity {
        /// The offending entity.
        entity: Entity,
    },

    /// The entity already holds a component of this type.
    #[error("{entity} already has a '{name}' component")]
    DuplicateComponent {
        /// The target entity.
        entity: Entity,
        /// The Rust type name of the component.
        name: &'static str,
    },

    /// The entity does not hold a component of this type.
    #[error("{entity} has no '{name}' component")]
    MissingComponent {
        /// The target entity.
        entity: Entity,
        /// The Rust type name of the component.
        name: &'static str,
    },
}

impl Error {
    /// Whether this error indicates incorrect wiring of component or system types.
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            Error::ComponentAlreadyRegistered { .. }
                | Error::ComponentNotRegistered { .. }
                | Error::TooManyComponentTypes { .. }
                | Error::SystemAlreadyRegistered { .. }
                | Error::SystemNotRegistered { .. }
                | Error::EmptySystemSignature { .. }
                | Error::UnregisteredSignatureBits { .. }
        )
    }

    /// Whether this error is the recoverable entity capacity condition.
    pub fn is_capacity(&self) -> bool {
        matches!(self, Error::CapacityExceeded { .. })
    }
}
