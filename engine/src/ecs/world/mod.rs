//! The World is the single integration point of the ECS.
//!
//! A `World` owns the entity registry, one component store per registered type, and every
//! registered system. All mutation goes through it, and it fans each mutation out to the three
//! in a fixed order so that they always agree:
//!
//! - **Create**: the entity registry hands out an identifier. Its signature is empty and no
//!   system sees it yet.
//! - **Destroy**: the entity registry clears the signature and recycles the identifier, every
//!   component store drops the entity's value, and every interest set drops the entity.
//! - **Attach**: the component store inserts the value, the entity's signature gains the type's
//!   bit, and every system re-evaluates the entity against the new signature.
//! - **Detach**: the mirror of attach. The value is removed before the signature changes, so a
//!   system dropping the entity never observes a dangling component.
//!
//! Each of these either completes fully or fails before touching any state.
//!
//! # Example
//!
//! ```ignore
//! use rusty_ecs::ecs::world::World;
//!
//! let mut world = World::new();
//! world.register_component::<Position>()?;
//!
//! let entity = world.create_entity()?;
//! world.add_component(entity, Position { x: 0.0, y: 0.0 })?;
//! world.get_component_mut::<Position>(entity)?.x += 1.0;
//! world.destroy_entity(entity)?;
//! ```
//!
//! # Threading
//!
//! There is no internal synchronization. A world is mutated from one logical thread, and nothing
//! may mutate it while a system iterates an interest set obtained from it.


use std::{
    any,
    sync::atomic::{AtomicU32, Ordering},
};

use log::{debug, error, trace, warn};

use crate::ecs::{
    component::{self, Component, IntoSignature, Store},
    entity::{self, Entity},
    error::{Error, Result},
    signature::Signature,
    system::{self, CommandBuffer, Commands, Context, Handle, Interest, System},
};

/// A world identifier, used to tell worlds apart in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Create a new world identifier.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Id(id)
    }

    /// Get the raw identifier value.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }

    /// Allocate an identifier not yet used by any world in this process.
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Construction parameters of a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The universe bound: the maximum number of simultaneously live entities.
    pub max_entities: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entities: entity::MAX_ENTITIES,
        }
    }
}

impl Config {
    /// Set the universe bound. Bounds above [`entity::Registry::MAX_CAPACITY`] are clamped
    /// when the world is created.
    #[must_use]
    pub const fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }
}

/// The central container for all entities, components and systems.
pub struct World {
    /// The world's identifier.
    id: Id,

    /// Identifier allocation and per-entity signatures.
    entities: entity::Registry,

    /// Component type registration and one store per type.
    components: component::Registry,

    /// System instances, their signatures and interest sets.
    systems: system::Registry,

    /// Structural changes deferred by running systems or other callers.
    commands: CommandBuffer,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a world with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a world with the given configuration.
    ///
    /// A universe bound above [`entity::Registry::MAX_CAPACITY`] is clamped to it.
    pub fn with_config(config: Config) -> Self {
        let id = Id::next();
        let entities = entity::Registry::new(config.max_entities);
        if entities.capacity() < config.max_entities {
            warn!(
                "world {}: clamped entity bound {} to {}",
                id.id(),
                config.max_entities,
                entities.capacity()
            );
        }
        // Stores and interest sets grow past this as identifiers are minted.
        let reserved = entities.capacity().min(entity::MAX_ENTITIES);
        debug!(
            "creating world {} for {} entities",
            id.id(),
            entities.capacity()
        );
        Self {
            id,
            entities,
            components: component::Registry::new(reserved),
            systems: system::Registry::new(reserved),
            commands: CommandBuffer::new(),
        }
    }

    /// The identifier of this world, unique within the process.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    // ---------------------------------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------------------------------

    /// Create a new entity with no components.
    ///
    /// # Errors
    /// - [`Error::CapacityExceeded`] if the universe bound has been reached.
    pub fn create_entity(&mut self) -> Result<Entity> {
        self.entities.create().inspect_err(|e| {
            warn!("world {}: {e}", self.id.id());
        })
    }

    /// Destroy an entity: recycle its identifier, drop its components and remove it from every
    /// interest set.
    ///
    /// # Errors
    /// - [`Error::DeadEntity`] if the entity is not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        self.ensure_alive(entity)?;
        self.entities.destroy(entity);
        let dropped = self.components.entity_destroyed(entity);
        debug_assert!(!self.components.holds_any(entity));
        self.systems.entity_destroyed(entity);
        trace!("world {}: destroyed {entity} with {dropped} components", self.id.id());
        Ok(())
    }

    /// Determine if the entity is currently alive.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// The number of live entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The universe bound of this world.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    /// Iterate the live entities, in ascending identifier order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().map(|(entity, _)| entity)
    }

    // ---------------------------------------------------------------------------------------------
    // Schema
    // ---------------------------------------------------------------------------------------------

    /// Register the component type `C`, assigning it the next component id.
    ///
    /// # Errors
    /// - [`Error::ComponentAlreadyRegistered`] if `C` is already registered.
    /// - [`Error::TooManyComponentTypes`] if every signature bit is in use.
    pub fn register_component<C: Component>(&mut self) -> Result<component::Id> {
        let result = self.components.register::<C>();
        self.report(result)
    }

    /// Get the id assigned to the component type `C`.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    pub fn component_id<C: Component>(&self) -> Result<component::Id> {
        let result = self.components.id::<C>();
        self.report(result)
    }

    /// The number of registered component types.
    #[inline]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Build the signature naming a component type or a tuple of component types.
    ///
    /// ```ignore
    /// let required = world.signature_of::<(Position, Velocity)>()?;
    /// ```
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if any named type was never registered.
    pub fn signature_of<T: IntoSignature>(&self) -> Result<Signature> {
        let result = T::into_signature(&self.components);
        self.report(result)
    }

    /// Register the system type `S`, constructing it with `Default`.
    ///
    /// # Errors
    /// - [`Error::SystemAlreadyRegistered`] if `S` is already registered.
    pub fn register_system<S: System + Default>(&mut self) -> Result<Handle<S>> {
        self.insert_system(S::default())
    }

    /// Register an already constructed system instance.
    ///
    /// # Errors
    /// - [`Error::SystemAlreadyRegistered`] if a system of type `S` is already registered.
    pub fn insert_system<S: System>(&mut self, system: S) -> Result<Handle<S>> {
        let result = self.systems.register(system);
        self.report(result)
    }

    /// Assign the signature required by `S`. The interest set of `S` is rebuilt from every live
    /// entity immediately.
    ///
    /// # Errors
    /// - [`Error::UnregisteredSignatureBits`] if `signature` names a component id that is not
    ///   registered.
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    /// - [`Error::EmptySystemSignature`] if `signature` is empty.
    pub fn set_system_signature<S: System>(&mut self, signature: Signature) -> Result<()> {
        let unknown = signature.bits() & !self.components.signature().bits();
        let result = if unknown != 0 {
            Err(Error::UnregisteredSignatureBits {
                name: any::type_name::<S>(),
                bits: unknown,
            })
        } else {
            self.systems.set_signature::<S>(signature, self.entities.iter())
        };
        self.report(result)
    }

    /// Get the signature required by `S`, or `None` if none was assigned yet.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn system_signature<S: System>(&self) -> Result<Option<Signature>> {
        let result = self.systems.signature::<S>();
        self.report(result)
    }

    /// The number of registered systems.
    #[inline]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    // ---------------------------------------------------------------------------------------------
    // Data
    // ---------------------------------------------------------------------------------------------

    /// Attach a `C` component to an entity and route the entity to every system whose signature
    /// it now satisfies.
    ///
    /// # Errors
    /// - [`Error::DeadEntity`] if the entity is not alive.
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    /// - [`Error::DuplicateComponent`] if the entity already has a `C` component.
    pub fn add_component<C: Component>(&mut self, entity: Entity, value: C) -> Result<()> {
        self.ensure_alive(entity)?;
        let id = self.component_id::<C>()?;
        self.components
            .store_mut::<C>()?
            .insert(entity, value)
            .map_err(|_| Error::DuplicateComponent {
                entity,
                name: any::type_name::<C>(),
            })?;

        let signature = self.entities.signature(entity).with(id);
        self.entities.set_signature(entity, signature);
        self.systems.entity_signature_changed(entity, signature);
        trace!(
            "world {}: attached '{}' to {entity}",
            self.id.id(),
            any::type_name::<C>()
        );
        Ok(())
    }

    /// Detach the `C` component of an entity, returning its value, and drop the entity from every
    /// system whose signature it no longer satisfies.
    ///
    /// # Errors
    /// - [`Error::DeadEntity`] if the entity is not alive.
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    /// - [`Error::MissingComponent`] if the entity has no `C` component.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Result<C> {
        self.ensure_alive(entity)?;
        let id = self.component_id::<C>()?;
        let value = self
            .components
            .store_mut::<C>()?
            .remove(entity)
            .ok_or_else(|| missing::<C>(entity))?;

        let signature = self.entities.signature(entity).without(id);
        self.entities.set_signature(entity, signature);
        self.systems.entity_signature_changed(entity, signature);
        trace!(
            "world {}: detached '{}' from {entity}",
            self.id.id(),
            any::type_name::<C>()
        );
        Ok(value)
    }

    /// Get the `C` component of an entity.
    ///
    /// # Errors
    /// - [`Error::DeadEntity`] if the entity is not alive.
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    /// - [`Error::MissingComponent`] if the entity has no `C` component.
    pub fn get_component<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.ensure_alive(entity)?;
        self.store::<C>()?
            .get(entity)
            .ok_or_else(|| missing::<C>(entity))
    }

    /// Get the `C` component of an entity mutably.
    ///
    /// # Errors
    /// - [`Error::DeadEntity`] if the entity is not alive.
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    /// - [`Error::MissingComponent`] if the entity has no `C` component.
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.ensure_alive(entity)?;
        self.component_id::<C>()?;
        self.components
            .store_mut::<C>()?
            .get_mut(entity)
            .ok_or_else(|| missing::<C>(entity))
    }

    /// Determine if an entity has a `C` component.
    ///
    /// # Errors
    /// - [`Error::DeadEntity`] if the entity is not alive.
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    pub fn has_component<C: Component>(&self, entity: Entity) -> Result<bool> {
        self.ensure_alive(entity)?;
        Ok(self.store::<C>()?.contains(entity))
    }

    /// Get the signature of an entity: the component types it currently holds.
    ///
    /// # Errors
    /// - [`Error::DeadEntity`] if the entity is not alive.
    pub fn signature(&self, entity: Entity) -> Result<Signature> {
        self.ensure_alive(entity)?;
        Ok(self.entities.signature(entity))
    }

    /// Get the whole store of `C`, for dense iteration in unspecified order.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    pub fn store<C: Component>(&self) -> Result<&Store<C>> {
        let result = self.components.store::<C>();
        self.report(result)
    }

    // ---------------------------------------------------------------------------------------------
    // Systems
    // ---------------------------------------------------------------------------------------------

    /// Get the system instance of type `S`.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn system<S: System>(&self) -> Result<&S> {
        let result = self.systems.get::<S>();
        self.report(result)
    }

    /// Get the system instance of type `S` mutably.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn system_mut<S: System>(&mut self) -> Result<&mut S> {
        let id = self.id;
        self.systems.get_mut::<S>().inspect_err(|e| {
            error!("world {}: {e}", id.id());
        })
    }

    /// Get the interest set of the system type `S`.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn interest<S: System>(&self) -> Result<&Interest> {
        let result = self.systems.interest::<S>();
        self.report(result)
    }

    /// Get the system a handle refers to. `None` if the handle belongs to another world.
    pub fn system_by_handle<S: System>(&self, handle: Handle<S>) -> Option<&S> {
        self.systems.get_by_handle(handle)
    }

    /// Get the interest set of the system a handle refers to. `None` if the handle belongs to
    /// another world.
    pub fn entities_of<S: System>(&self, handle: Handle<S>) -> Option<&Interest> {
        self.systems.interest_by_handle(handle)
    }

    /// Run one tick of a system, then apply the commands it queued.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if the handle does not belong to this world.
    /// - The first error of a queued command, see [`flush_commands`](Self::flush_commands).
    pub fn run_system<S: System>(&mut self, handle: Handle<S>, delta: f32) -> Result<()> {
        let Some((system, interest)) = self.systems.split_mut(handle) else {
            let error = Error::SystemNotRegistered {
                name: any::type_name::<S>(),
            };
            error!("world {}: {error}", self.id.id());
            return Err(error);
        };
        let mut ctx = Context::new(interest, &mut self.components, &self.commands);
        system.update(&mut ctx, delta);
        self.flush_commands()
    }

    /// Run one tick of the system of type `S`, then apply the commands it queued.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    /// - The first error of a queued command, see [`flush_commands`](Self::flush_commands).
    pub fn run<S: System>(&mut self, delta: f32) -> Result<()> {
        let result = self.systems.handle::<S>();
        let handle = self.report(result)?;
        self.run_system(handle, delta)
    }

    // ---------------------------------------------------------------------------------------------
    // Deferred commands
    // ---------------------------------------------------------------------------------------------

    /// Queue structural changes to apply on the next [`flush_commands`](Self::flush_commands).
    #[inline]
    pub fn commands(&self) -> Commands<'_> {
        Commands::new(&self.commands)
    }

    /// Apply every queued command in FIFO order.
    ///
    /// Each command is applied atomically. A failing command is logged and skipped, the remaining
    /// commands still run, and the first failure is returned.
    pub fn flush_commands(&mut self) -> Result<()> {
        let mut first_error = None;
        for command in self.commands.drain() {
            let description = format!("{command:?}");
            if let Err(e) = command.apply(self) {
                warn!("world {}: command {description} failed: {e}", self.id.id());
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    // ---------------------------------------------------------------------------------------------
    // Internal
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn ensure_alive(&self, entity: Entity) -> Result<()> {
        if self.entities.is_alive(entity) {
            Ok(())
        } else {
            Err(Error::DeadEntity { entity })
        }
    }

    /// Log schema errors loudly before handing them back.
    fn report<T>(&self, result: Result<T>) -> Result<T> {
        result.inspect_err(|e| {
            if e.is_schema() {
                error!("world {}: {e}", self.id.id());
            }
        })
    }
}

impl Drop for World {
    fn drop(&mut self) {
        debug!(
            "tearing down world {} with {} entities, {} component types, {} systems",
            self.id.id(),
            self.entities.len(),
            self.components.len(),
            self.systems.len()
        );
        for (id, name, len) in self.components.summary() {
            trace!("world {}: {id:?} '{name}' holds {len} values", self.id.id());
        }
    }
}

fn missing<C: Component>(entity: Entity) -> Error {
    Error::MissingComponent {
        entity,
        name: any::type_name::<C>(),
    }
}
