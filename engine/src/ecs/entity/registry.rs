use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use log::trace;

use crate::ecs::{
    entity::{Entity, MAX_ENTITIES},
    error::{Error, Result},
    signature::Signature,
};

/// The collection of all entity identifiers in a world. Tracks which identifiers are live and the
/// signature of each one.
///
/// Identifiers never handed out come first, in ascending order, and destroyed identifiers queue
/// up behind them. Storage is reserved for up to [`MAX_ENTITIES`] identifiers and grows as new
/// identifiers are minted.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Destroyed identifiers available for reuse, oldest destroyed first.
    available: VecDeque<Entity>,

    /// Signature of every identifier minted so far, indexed by entity.
    signatures: Vec<Signature>,

    /// Bit N is set while entity N is live.
    alive: FixedBitSet,

    /// The universe bound.
    capacity: usize,
}

impl Registry {
    /// The largest universe an [`Entity`] identifier can address.
    pub const MAX_CAPACITY: usize = u32::MAX as usize;

    /// Construct a registry for a universe of `capacity` identifiers, all initially free.
    /// Bounds above [`MAX_CAPACITY`](Self::MAX_CAPACITY) are clamped to it.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(Self::MAX_CAPACITY);
        let reserved = capacity.min(MAX_ENTITIES);
        Self {
            available: VecDeque::new(),
            signatures: Vec::with_capacity(reserved),
            alive: FixedBitSet::with_capacity(reserved),
            capacity,
        }
    }

    /// Take an identifier from the free pool.
    ///
    /// # Errors
    /// - [`Error::CapacityExceeded`] when every identifier is live.
    pub fn create(&mut self) -> Result<Entity> {
        let entity = if self.signatures.len() < self.capacity {
            let entity = Entity::new(self.signatures.len() as u32);
            self.signatures.push(Signature::EMPTY);
            self.alive.grow(self.signatures.len());
            entity
        } else {
            self.available.pop_front().ok_or(Error::CapacityExceeded {
                capacity: self.capacity,
            })?
        };
        self.alive.insert(entity.index());
        trace!("created {entity}");
        Ok(entity)
    }

    /// Clear the entity's signature and return its identifier to the back of the free pool.
    ///
    /// The caller must have checked that the entity is live; this layer does not touch component
    /// stores or interest sets.
    pub fn destroy(&mut self, entity: Entity) {
        debug_assert!(self.is_alive(entity), "destroying {entity} which is not alive");
        self.signatures[entity.index()] = Signature::EMPTY;
        self.alive.set(entity.index(), false);
        self.available.push_back(entity);
        trace!("destroyed {entity}");
    }

    /// Overwrite the signature of an entity. The entity must be live.
    #[inline]
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) {
        self.signatures[entity.index()] = signature;
    }

    /// Get the signature of an entity. Identifiers never handed out have the empty signature.
    #[inline]
    pub fn signature(&self, entity: Entity) -> Signature {
        self.signatures
            .get(entity.index())
            .copied()
            .unwrap_or_default()
    }

    /// Determine if the given entity is currently live. Out of range identifiers are never live.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(entity.index())
    }

    /// The number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.signatures.len() - self.available.len()
    }

    /// Whether no entity is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The universe bound: the maximum number of simultaneously live entities.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate the live entities together with their signatures, in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, Signature)> + '_ {
        self.alive
            .ones()
            .map(|index| (Entity::new(index as u32), self.signatures[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component;

    #[test]
    fn create_hands_out_unique_ids() {
        // Given
        let mut registry = Registry::new(100);

        // When
        let mut entities: Vec<_> = (0..100).map(|_| registry.create().unwrap()).collect();

        // Then
        entities.sort();
        entities.dedup();
        assert_eq!(entities.len(), 100);
        assert_eq!(registry.len(), 100);
        assert!(entities.iter().all(|e| registry.is_alive(*e)));
    }

    #[test]
    fn create_fails_at_capacity() {
        // Given
        let mut registry = Registry::new(2);
        let first = registry.create().unwrap();
        registry.create().unwrap();

        // When
        let result = registry.create();

        // Then
        assert_eq!(result, Err(Error::CapacityExceeded { capacity: 2 }));

        // When - one is destroyed
        registry.destroy(first);

        // Then - creation succeeds again and reuses the freed id
        assert_eq!(registry.create(), Ok(first));
    }

    #[test]
    fn recycles_ids_fifo() {
        // Given
        let mut registry = Registry::new(4);
        let e0 = registry.create().unwrap();
        let e1 = registry.create().unwrap();
        let e2 = registry.create().unwrap();

        // When
        registry.destroy(e1);
        registry.destroy(e0);

        // Then - the never-used id comes first, then destroyed ids in destruction order
        assert_eq!(registry.create().unwrap(), Entity::new(3));
        assert_eq!(registry.create().unwrap(), e1);
        assert_eq!(registry.create().unwrap(), e0);
        assert!(registry.is_alive(e2));
    }

    #[test]
    fn destroy_clears_signature() {
        // Given
        let mut registry = Registry::new(4);
        let entity = registry.create().unwrap();
        registry.set_signature(entity, Signature::EMPTY.with(component::Id::new(3)));

        // When
        registry.destroy(entity);

        // Then
        assert_eq!(registry.signature(entity), Signature::EMPTY);
        assert!(!registry.is_alive(entity));
        assert!(registry.is_empty());
    }

    #[test]
    fn out_of_range_entity_is_not_alive() {
        // Given
        let registry = Registry::new(4);

        // Then
        assert!(!registry.is_alive(Entity::new(999)));
        assert_eq!(registry.signature(Entity::new(999)), Signature::EMPTY);
    }

    #[test]
    fn oversized_universe_is_clamped() {
        // Given
        let mut registry = Registry::new(usize::MAX);

        // When
        let first = registry.create().unwrap();
        let second = registry.create().unwrap();

        // Then
        assert_eq!(registry.capacity(), Registry::MAX_CAPACITY);
        assert_eq!((first, second), (Entity::new(0), Entity::new(1)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn iterates_live_entities_with_signatures() {
        // Given
        let mut registry = Registry::new(8);
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();
        let c = registry.create().unwrap();
        let signature = Signature::EMPTY.with(component::Id::new(1));
        registry.set_signature(c, signature);
        registry.destroy(b);

        // When
        let live: Vec<_> = registry.iter().collect();

        // Then
        assert_eq!(live, vec![(a, Signature::EMPTY), (c, signature)]);
    }
}
