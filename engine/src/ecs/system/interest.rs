use std::iter::Map;

use fixedbitset::{FixedBitSet, Ones};

use crate::ecs::entity::Entity;

/// The set of entities currently satisfying a system's required signature.
///
/// Stored as a bitset over the entity universe, so membership changes are O(1) and iteration
/// yields entities in ascending identifier order. Callers must not rely on that order.
#[derive(Debug, Clone, Default)]
pub struct Interest {
    /// Bit N is set while entity N is a member.
    members: FixedBitSet,

    /// Cached member count.
    len: usize,
}

impl Interest {
    /// Create an empty set sized for `capacity` entities.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            members: FixedBitSet::with_capacity(capacity),
            len: 0,
        }
    }

    /// Add an entity. Returns `true` if it was not already a member.
    pub(crate) fn insert(&mut self, entity: Entity) -> bool {
        let index = entity.index();
        if index >= self.members.len() {
            self.members.grow(index + 1);
        }
        let added = !self.members.put(index);
        if added {
            self.len += 1;
        }
        added
    }

    /// Remove an entity. Returns `true` if it was a member.
    pub(crate) fn remove(&mut self, entity: Entity) -> bool {
        if !self.contains(entity) {
            return false;
        }
        self.members.set(entity.index(), false);
        self.len -= 1;
        true
    }

    /// Remove every member.
    pub(crate) fn clear(&mut self) {
        self.members.clear();
        self.len = 0;
    }

    /// Determine if the entity is a member.
    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(entity.index())
    }

    /// The number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate the members.
    pub fn iter(&self) -> Iter<'_> {
        self.members.ones().map(entity_at as fn(usize) -> Entity)
    }
}

/// Iterator over the members of an [`Interest`].
pub type Iter<'a> = Map<Ones<'a>, fn(usize) -> Entity>;

fn entity_at(index: usize) -> Entity {
    Entity::new(index as u32)
}

impl<'a> IntoIterator for &'a Interest {
    type Item = Entity;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_are_idempotent() {
        // Given
        let mut interest = Interest::new(8);
        let entity = Entity::new(3);

        // Then
        assert!(interest.insert(entity));
        assert!(!interest.insert(entity));
        assert_eq!(interest.len(), 1);
        assert!(interest.contains(entity));

        assert!(interest.remove(entity));
        assert!(!interest.remove(entity));
        assert!(interest.is_empty());
        assert!(!interest.contains(entity));
    }

    #[test]
    fn iterates_members() {
        // Given
        let mut interest = Interest::new(16);
        for id in [9, 2, 14] {
            interest.insert(Entity::new(id));
        }

        // When
        let members: Vec<_> = (&interest).into_iter().collect();

        // Then
        assert_eq!(members, vec![Entity::new(2), Entity::new(9), Entity::new(14)]);
    }

    #[test]
    fn grows_past_presized_range() {
        // Given
        let mut interest = Interest::new(2);

        // When
        interest.insert(Entity::new(40));

        // Then
        assert!(interest.contains(Entity::new(40)));
        assert!(!interest.remove(Entity::new(100)));
        assert_eq!(interest.len(), 1);
    }

    #[test]
    fn clear_empties_the_set() {
        // Given
        let mut interest = Interest::new(4);
        interest.insert(Entity::new(0));
        interest.insert(Entity::new(1));

        // When
        interest.clear();

        // Then
        assert!(interest.is_empty());
        assert_eq!(interest.iter().count(), 0);
    }
}
