//! Fixed-width component signatures.
//!
//! A [`Signature`] has one bit per registered component type. Entities carry one describing the
//! component types they hold; systems carry one describing the types they require. An entity
//! belongs to a system's interest set exactly when its signature contains every bit of the
//! system's signature.

use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

use crate::ecs::component;

/// The number of distinct component types a world supports: the width of a [`Signature`].
pub const MAX_COMPONENTS: usize = u32::BITS as usize;

/// A set of component type ids, stored as a bit vector.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(u32);

impl Signature {
    /// The signature with no component types.
    pub const EMPTY: Self = Self(0);

    /// Construct a signature from raw bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the raw bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Get a copy of this signature with the bit for `id` set.
    #[inline]
    #[must_use]
    pub const fn with(self, id: component::Id) -> Self {
        Self(self.0 | Self::bit(id))
    }

    /// Get a copy of this signature with the bit for `id` cleared.
    #[inline]
    #[must_use]
    pub const fn without(self, id: component::Id) -> Self {
        Self(self.0 & !Self::bit(id))
    }

    /// Set the bit for `id`.
    #[inline]
    pub fn insert(&mut self, id: component::Id) {
        *self = self.with(id);
    }

    /// Clear the bit for `id`.
    #[inline]
    pub fn remove(&mut self, id: component::Id) {
        *self = self.without(id);
    }

    /// Whether the bit for `id` is set.
    #[inline]
    pub const fn contains(&self, id: component::Id) -> bool {
        self.0 & Self::bit(id) != 0
    }

    /// Whether every component type in `required` is also in this signature.
    #[inline]
    pub const fn contains_all(&self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    /// Whether no bit is set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The number of component types in the signature.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the component type ids in this signature, lowest first.
    pub fn ids(&self) -> impl Iterator<Item = component::Id> + use<> {
        let bits = self.0;
        (0..MAX_COMPONENTS as u32)
            .filter(move |bit| bits & (1 << bit) != 0)
            .map(component::Id::new)
    }

    /// The bit for `id`, or no bit at all for an id past the signature width.
    #[inline]
    const fn bit(id: component::Id) -> u32 {
        debug_assert!(id.index() < MAX_COMPONENTS);
        match 1u32.checked_shl(id.index() as u32) {
            Some(bit) => bit,
            None => 0,
        }
    }
}

impl BitAnd for Signature {
    type Output = Signature;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Signature {
    type Output = Signature;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl FromIterator<component::Id> for Signature {
    fn from_iter<I: IntoIterator<Item = component::Id>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Signature::with)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#b})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: u32) -> component::Id {
        component::Id::new(value)
    }

    #[test]
    fn set_and_clear_bits() {
        // Given
        let mut signature = Signature::EMPTY;

        // When
        signature.insert(id(0));
        signature.insert(id(5));
        signature.insert(id(31));

        // Then
        assert!(signature.contains(id(0)));
        assert!(signature.contains(id(5)));
        assert!(signature.contains(id(31)));
        assert!(!signature.contains(id(1)));
        assert_eq!(signature.len(), 3);

        // When
        signature.remove(id(5));

        // Then
        assert!(!signature.contains(id(5)));
        assert_eq!(signature.len(), 2);
    }

    #[test]
    fn contains_all_matches_superset_only() {
        // Given
        let required = Signature::EMPTY.with(id(1)).with(id(2));

        // Then
        assert!(required.contains_all(required));
        assert!(required.with(id(7)).contains_all(required));
        assert!(!Signature::EMPTY.with(id(1)).contains_all(required));
        assert!(!Signature::EMPTY.contains_all(required));
        assert!(required.contains_all(Signature::EMPTY));
    }

    #[test]
    fn operators_match_bits() {
        // Given
        let a = Signature::from_bits(0b0110);
        let b = Signature::from_bits(0b0011);

        // Then
        assert_eq!((a & b).bits(), 0b0010);
        assert_eq!((a | b).bits(), 0b0111);
        assert!((a | b).contains_all(a));
    }

    #[test]
    fn collect_and_iterate_ids() {
        // Given
        let signature: Signature = [id(4), id(0), id(9)].into_iter().collect();

        // When
        let ids: Vec<_> = signature.ids().collect();

        // Then
        assert_eq!(ids, vec![id(0), id(4), id(9)]);
        assert_eq!(format!("{signature:?}"), "Signature(0b1000010001)");
    }
}
