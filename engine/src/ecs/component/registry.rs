use std::{
    any::{self, TypeId},
    collections::HashMap,
};

use log::debug;

use crate::ecs::{
    component::{Component, Id, Store, store::AnyStore},
    entity::Entity,
    error::{Error, Result},
    signature::{MAX_COMPONENTS, Signature},
};

/// Registration of component types and ownership of their stores.
///
/// Each registered type gets the next sequential [`Id`], keyed by its Rust [`TypeId`]. The id
/// indexes both the store list and the bit of the type in a signature, so at most
/// [`MAX_COMPONENTS`] types can be registered.
pub struct Registry {
    /// Map from Rust TypeId to component Id.
    ids: HashMap<TypeId, Id>,

    /// One store per registered type, indexed by component Id.
    stores: Vec<Box<dyn AnyStore>>,

    /// The entity universe bound new stores are sized for.
    capacity: usize,
}

impl Registry {
    /// Create an empty registry whose stores are sized for `capacity` entities.
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: HashMap::new(),
            stores: Vec::new(),
            capacity,
        }
    }

    /// Register the component type `C` and create its store.
    ///
    /// # Errors
    /// - [`Error::ComponentAlreadyRegistered`] if `C` was registered before.
    /// - [`Error::TooManyComponentTypes`] if every signature bit is already assigned.
    pub fn register<C: Component>(&mut self) -> Result<Id> {
        let name = any::type_name::<C>();
        if self.ids.contains_key(&TypeId::of::<C>()) {
            return Err(Error::ComponentAlreadyRegistered { name });
        }
        if self.stores.len() >= MAX_COMPONENTS {
            return Err(Error::TooManyComponentTypes {
                name,
                max: MAX_COMPONENTS,
            });
        }

        let id = Id::new(self.stores.len() as u32);
        self.ids.insert(TypeId::of::<C>(), id);
        self.stores.push(Box::new(Store::<C>::new(self.capacity)));
        debug!("registered component type '{name}' as {id:?}");
        Ok(id)
    }

    /// Get the id assigned to the component type `C`.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    #[inline]
    pub fn id<C: Component>(&self) -> Result<Id> {
        self.ids
            .get(&TypeId::of::<C>())
            .copied()
            .ok_or_else(not_registered::<C>)
    }

    /// The signature naming every registered component type.
    pub fn signature(&self) -> Signature {
        (0..self.stores.len() as u32).map(Id::new).collect()
    }

    /// Get the store of the component type `C`.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    pub fn store<C: Component>(&self) -> Result<&Store<C>> {
        let id = self.id::<C>()?;
        self.stores[id.index()]
            .as_any()
            .downcast_ref::<Store<C>>()
            .ok_or_else(not_registered::<C>)
    }

    /// Get the store of the component type `C` mutably.
    ///
    /// # Errors
    /// - [`Error::ComponentNotRegistered`] if `C` was never registered.
    pub fn store_mut<C: Component>(&mut self) -> Result<&mut Store<C>> {
        let id = self.id::<C>()?;
        self.stores[id.index()]
            .as_any_mut()
            .downcast_mut::<Store<C>>()
            .ok_or_else(not_registered::<C>)
    }

    /// Drop every value the entity holds, in every store. Returns how many values were dropped.
    pub fn entity_destroyed(&mut self, entity: Entity) -> usize {
        self.stores
            .iter_mut()
            .map(|store| store.entity_destroyed(entity))
            .filter(|dropped| *dropped)
            .count()
    }

    /// Determine if any store holds a value for the entity.
    pub fn holds_any(&self, entity: Entity) -> bool {
        self.stores.iter().any(|store| store.contains(entity))
    }

    /// The number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no component type is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// The Rust type name and live value count of every registered type, in id order.
    pub fn summary(&self) -> impl Iterator<Item = (Id, &'static str, usize)> + '_ {
        self.stores
            .iter()
            .enumerate()
            .map(|(index, store)| (Id::new(index as u32), store.type_name(), store.len()))
    }
}

fn not_registered<C: Component>() -> Error {
    Error::ComponentNotRegistered {
        name: any::type_name::<C>(),
    }
}

#[cfg(test)]
mod tests {
    use rusty_ecs_macros::Component;

    use super::*;

    #[derive(Component, Debug, PartialEq)]
    struct Position {
        x: i32,
    }

    #[derive(Component, Debug, PartialEq)]
    struct Velocity {
        dx: i32,
    }

    #[test]
    fn component_registration() {
        // Given
        let mut registry = Registry::new(16);

        // When
        let pos_id = registry.register::<Position>().unwrap();
        let vel_id = registry.register::<Velocity>().unwrap();

        // Then
        assert_eq!(pos_id, Id::new(0));
        assert_eq!(vel_id, Id::new(1));
        assert_eq!(registry.id::<Position>(), Ok(pos_id));
        assert_eq!(registry.id::<Velocity>(), Ok(vel_id));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.signature(), Signature::from_bits(0b11));
    }

    #[test]
    fn duplicate_registration_fails() {
        // Given
        let mut registry = Registry::new(16);
        registry.register::<Position>().unwrap();

        // When
        let result = registry.register::<Position>();

        // Then
        assert!(matches!(
            result,
            Err(Error::ComponentAlreadyRegistered { name }) if name.ends_with("Position")
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregistered_lookup_fails() {
        // Given
        let registry = Registry::new(16);

        // Then
        assert_eq!(registry.signature(), Signature::EMPTY);
        assert!(matches!(
            registry.id::<Position>(),
            Err(Error::ComponentNotRegistered { .. })
        ));
        assert!(registry.store::<Position>().is_err());
    }

    #[test]
    fn registration_is_bounded_by_signature_width() {
        // Given
        struct Tag<const N: usize>;
        impl<const N: usize> Component for Tag<N> {}

        let mut registry = Registry::new(4);
        macro_rules! register_tags {
            ($($n:literal)*) => { $( registry.register::<Tag<$n>>().unwrap(); )* };
        }
        register_tags!(0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31);

        // When
        let result = registry.register::<Tag<32>>();

        // Then
        assert_eq!(registry.len(), MAX_COMPONENTS);
        assert!(matches!(result, Err(Error::TooManyComponentTypes { max: 32, .. })));
    }

    #[test]
    fn typed_store_access() {
        // Given
        let mut registry = Registry::new(16);
        registry.register::<Position>().unwrap();
        let entity = Entity::new(4);

        // When
        registry
            .store_mut::<Position>()
            .unwrap()
            .insert(entity, Position { x: 7 })
            .unwrap();

        // Then
        assert_eq!(
            registry.store::<Position>().unwrap().get(entity),
            Some(&Position { x: 7 })
        );
        assert!(registry.holds_any(entity));
    }

    #[test]
    fn entity_destroyed_reaches_every_store() {
        // Given
        let mut registry = Registry::new(16);
        registry.register::<Position>().unwrap();
        registry.register::<Velocity>().unwrap();
        let (a, b) = (Entity::new(0), Entity::new(1));
        registry.store_mut::<Position>().unwrap().insert(a, Position { x: 1 }).unwrap();
        registry.store_mut::<Position>().unwrap().insert(b, Position { x: 2 }).unwrap();
        registry.store_mut::<Velocity>().unwrap().insert(a, Velocity { dx: 3 }).unwrap();

        // When
        let dropped = registry.entity_destroyed(a);

        // Then
        assert_eq!(dropped, 2);
        assert!(!registry.holds_any(a));
        assert_eq!(
            registry.store::<Position>().unwrap().get(b),
            Some(&Position { x: 2 })
        );
        let summary: Vec<_> = registry.summary().map(|(id, _, len)| (id, len)).collect();
        assert_eq!(summary, vec![(Id::new(0), 1), (Id::new(1), 0)]);
    }
}
