use std::any;

use crate::ecs::{
    component::{self, Component, Store},
    entity::Entity,
    error::{Error, Result},
    system::{CommandBuffer, Commands, Interest},
};

/// What a running system can see of the world: its own interest set, component values, and a
/// queue for structural changes that are applied after the system returns.
pub struct Context<'w> {
    /// The interest set of the running system.
    entities: &'w Interest,

    /// Every component store of the world.
    components: &'w mut component::Registry,

    /// Deferred structural changes.
    commands: &'w CommandBuffer,
}

impl<'w> Context<'w> {
    pub(crate) fn new(
        entities: &'w Interest,
        components: &'w mut component::Registry,
        commands: &'w CommandBuffer,
    ) -> Self {
        Self {
            entities,
            components,
            commands,
        }
    }

    /// The entities matching the running system's signature.
    ///
    /// The returned reference is not tied to the borrow of the context, so component values can be
    /// modified while iterating.
    #[inline]
    pub fn entities(&self) -> &'w Interest {
        self.entities
    }

    /// Get the `C` component of an entity.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    /// - [`Error::MissingComponent`] if the entity has no `C` component.
    pub fn get<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.components
            .store::<C>()?
            .get(entity)
            .ok_or_else(|| missing::<C>(entity))
    }

    /// Get the `C` component of an entity mutably.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    /// - [`Error::MissingComponent`] if the entity has no `C` component.
    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.components
            .store_mut::<C>()?
            .get_mut(entity)
            .ok_or_else(|| missing::<C>(entity))
    }

    /// Determine if an entity has a `C` component.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    pub fn has<C: Component>(&self, entity: Entity) -> Result<bool> {
        Ok(self.components.store::<C>()?.contains(entity))
    }

    /// Get the whole store of `C`, for dense iteration.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    pub fn store<C: Component>(&self) -> Result<&Store<C>> {
        self.components.store::<C>()
    }

    /// Get the whole store of `C` mutably. Values can be changed in place; inserting or removing
    /// values must go through [`commands`](Self::commands).
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    pub fn values_mut<C: Component>(&mut self) -> Result<&mut [C]> {
        Ok(self.components.store_mut::<C>()?.values_mut())
    }

    /// Queue structural changes to apply after the system returns.
    #[inline]
    pub fn commands(&self) -> Commands<'w> {
        Commands::new(self.commands)
    }
}

fn missing<C: Component>(entity: Entity) -> Error {
    Error::MissingComponent {
        entity,
        name: any::type_name::<C>(),
    }
}
