use std::any::{self, Any};

use crate::ecs::entity::Entity;

/// Dense storage for the values of one component type.
///
/// Values are packed into slots `[0, len)` with no gaps. Two indexes are kept in step with the
/// dense array: entity to slot, and slot to entity. Removal moves the last value into the freed
/// slot, so removal is O(1) but does not preserve order. A slot is only meaningful until the next
/// mutation of the store; always resolve values by entity.
#[derive(Debug)]
pub struct Store<T> {
    /// The dense storage of component values.
    dense: Vec<T>,

    /// The owner of each dense slot. Always the same length as `dense`.
    entities: Vec<Entity>,

    /// The dense slot of each entity, indexed by entity.
    slots: Vec<Option<usize>>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> Store<T> {
    /// Create a store pre-sized for a universe of `capacity` entities.
    pub fn new(capacity: usize) -> Self {
        Self {
            dense: Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            slots: vec![None; capacity],
        }
    }

    /// Append a value for the given entity.
    ///
    /// If the entity already has a value in this store, nothing changes and the new value is
    /// handed back as the error.
    pub fn insert(&mut self, entity: Entity, value: T) -> Result<(), T> {
        if self.contains(entity) {
            return Err(value);
        }
        self.ensure_capacity(entity.index());

        let slot = self.dense.len();
        self.dense.push(value);
        self.entities.push(entity);
        self.slots[entity.index()] = Some(slot);
        Ok(())
    }

    /// Remove the value for the given entity, if it exists.
    ///
    /// The last value is moved into the freed slot to keep the storage dense.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slots.get_mut(entity.index())?.take()?;

        let value = self.dense.swap_remove(slot);
        self.entities.swap_remove(slot);

        // If a value was moved into the freed slot, point its owner at the new slot.
        if let Some(moved) = self.entities.get(slot) {
            self.slots[moved.index()] = Some(slot);
        }
        Some(value)
    }

    /// Drop the value for an entity that is being destroyed. Returns `true` if the entity held a
    /// value in this store.
    #[inline]
    pub fn entity_destroyed(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    /// Get the value for the given entity, if it exists.
    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.dense[slot])
    }

    /// Get the value for the given entity mutably, if it exists.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slot(entity).map(|slot| &mut self.dense[slot])
    }

    /// Determine if the given entity has a value in this store.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    /// Get the current dense slot of the given entity. Invalidated by any mutation.
    #[inline]
    pub fn slot(&self, entity: Entity) -> Option<usize> {
        self.slots.get(entity.index()).copied().flatten()
    }

    /// The number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Whether the store holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// The live values, densely packed. Order is unspecified.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.dense
    }

    /// The live values, densely packed and mutable. Order is unspecified.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.dense
    }

    /// The owner of each value, in the same order as [`values`](Self::values).
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate every entity and its value. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Iterate every entity and its value mutably. Order is unspecified.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.dense.iter_mut())
    }

    /// Ensure the entity index has capacity for the given index.
    #[inline]
    fn ensure_capacity(&mut self, index: usize) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
    }
}

/// Type-erased access to a [`Store`], letting the registry fan entity destruction out to every
/// store without knowing its value type.
pub(crate) trait AnyStore: Any {
    /// Drop the entity's value if present. Returns `true` if a value was dropped.
    fn entity_destroyed(&mut self, entity: Entity) -> bool;

    /// Determine if the entity has a value in this store.
    fn contains(&self, entity: Entity) -> bool;

    /// The number of live values.
    fn len(&self) -> usize;

    /// The Rust type name of the stored values.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AnyStore for Store<T> {
    fn entity_destroyed(&mut self, entity: Entity) -> bool {
        Store::entity_destroyed(self, entity)
    }

    fn contains(&self, entity: Entity) -> bool {
        Store::contains(self, entity)
    }

    fn len(&self) -> usize {
        Store::len(self)
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
