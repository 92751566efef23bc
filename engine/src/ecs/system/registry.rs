//! System registry: one instance per system type, its required signature and its interest set.

use std::{
    any::{self, Any, TypeId},
    collections::HashMap,
};

use log::{debug, trace};

use crate::ecs::{
    entity::Entity,
    error::{Error, Result},
    signature::Signature,
    system::{Handle, Id, Interest, System},
};

/// Everything the registry keeps for one system type.
struct Entry {
    /// The Rust type name of the system.
    name: &'static str,

    /// The required signature, once assigned. Unassigned systems are never evaluated.
    signature: Option<Signature>,

    /// The system instance.
    system: Box<dyn Any>,

    /// Entities currently matching `signature`.
    interest: Interest,
}

impl Entry {
    /// Add or remove the entity depending on whether `signature` satisfies this system.
    fn evaluate(&mut self, entity: Entity, signature: Signature) {
        let Some(required) = self.signature else {
            return;
        };
        if signature.contains_all(required) {
            if self.interest.insert(entity) {
                trace!("{entity} joined '{}'", self.name);
            }
        } else if self.interest.remove(entity) {
            trace!("{entity} left '{}'", self.name);
        }
    }
}

/// A registry for storing ECS systems and routing entities to them by signature.
pub struct Registry {
    /// Map from Rust TypeId to system Id.
    ids: HashMap<TypeId, Id>,

    /// All registered systems, indexed by their [`Id`].
    entries: Vec<Entry>,

    /// The entity universe bound interest sets are sized for.
    capacity: usize,
}

impl Registry {
    /// Create an empty registry whose interest sets are sized for `capacity` entities.
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: HashMap::new(),
            entries: Vec::new(),
            capacity,
        }
    }

    /// Register a system instance and return its handle. The system starts with no signature and
    /// an empty interest set.
    ///
    /// # Errors
    /// - [`Error::SystemAlreadyRegistered`] if a system of type `S` was registered before.
    pub fn register<S: System>(&mut self, system: S) -> Result<Handle<S>> {
        let name = any::type_name::<S>();
        if self.ids.contains_key(&TypeId::of::<S>()) {
            return Err(Error::SystemAlreadyRegistered { name });
        }

        let id = Id::new(self.entries.len() as u32);
        self.ids.insert(TypeId::of::<S>(), id);
        self.entries.push(Entry {
            name,
            signature: None,
            system: Box::new(system),
            interest: Interest::new(self.capacity),
        });
        debug!("registered system '{name}' as {id:?}");
        Ok(Handle::new(id))
    }

    /// Assign the signature required by `S` and rebuild its interest set from `entities`, which
    /// must yield every live entity with its current signature.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    /// - [`Error::EmptySystemSignature`] if `signature` is empty.
    pub fn set_signature<S: System>(
        &mut self,
        signature: Signature,
        entities: impl IntoIterator<Item = (Entity, Signature)>,
    ) -> Result<()> {
        let id = self.id::<S>()?;
        let entry = &mut self.entries[id.index()];
        if signature.is_empty() {
            return Err(Error::EmptySystemSignature { name: entry.name });
        }

        entry.signature = Some(signature);
        entry.interest.clear();
        for (entity, current) in entities {
            entry.evaluate(entity, current);
        }
        debug!(
            "system '{}' requires {signature:?}, {} entities match",
            entry.name,
            entry.interest.len()
        );
        Ok(())
    }

    /// Get the signature required by `S`, or `None` if none was assigned yet.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn signature<S: System>(&self) -> Result<Option<Signature>> {
        let id = self.id::<S>()?;
        Ok(self.entries[id.index()].signature)
    }

    /// Remove the entity from every interest set.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for entry in &mut self.entries {
            entry.interest.remove(entity);
        }
    }

    /// Re-evaluate the entity against every system with an assigned signature.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: Signature) {
        for entry in &mut self.entries {
            entry.evaluate(entity, signature);
        }
    }

    /// Get the handle of the registered system type `S`.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn handle<S: System>(&self) -> Result<Handle<S>> {
        self.id::<S>().map(Handle::new)
    }

    /// Get the system instance of type `S`.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn get<S: System>(&self) -> Result<&S> {
        let handle = self.handle::<S>()?;
        self.get_by_handle(handle).ok_or_else(not_registered::<S>)
    }

    /// Get the system instance of type `S` mutably.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn get_mut<S: System>(&mut self) -> Result<&mut S> {
        let handle = self.handle::<S>()?;
        self.split_mut(handle)
            .map(|(system, _)| system)
            .ok_or_else(not_registered::<S>)
    }

    /// Get the interest set of the system type `S`.
    ///
    /// # Errors
    /// - [`Error::SystemNotRegistered`] if `S` was never registered.
    pub fn interest<S: System>(&self) -> Result<&Interest> {
        let id = self.id::<S>()?;
        Ok(&self.entries[id.index()].interest)
    }

    /// Get the system a handle refers to. `None` if the handle came from another world.
    pub fn get_by_handle<S: System>(&self, handle: Handle<S>) -> Option<&S> {
        self.entries
            .get(handle.id().index())
            .and_then(|entry| entry.system.downcast_ref::<S>())
    }

    /// Get the interest set of the system a handle refers to. `None` if the handle came from
    /// another world.
    pub fn interest_by_handle<S: System>(&self, handle: Handle<S>) -> Option<&Interest> {
        self.entries
            .get(handle.id().index())
            .filter(|entry| entry.system.is::<S>())
            .map(|entry| &entry.interest)
    }

    /// Borrow a system mutably together with its interest set.
    pub(crate) fn split_mut<S: System>(
        &mut self,
        handle: Handle<S>,
    ) -> Option<(&mut S, &Interest)> {
        let entry = self.entries.get_mut(handle.id().index())?;
        let system = entry.system.downcast_mut::<S>()?;
        Some((system, &entry.interest))
    }

    /// The number of registered systems.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no system is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the name, required signature and interest set of every system, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<Signature>, &Interest)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.name, entry.signature, &entry.interest))
    }

    fn id<S: System>(&self) -> Result<Id> {
        self.ids
            .get(&TypeId::of::<S>())
            .copied()
            .ok_or_else(not_registered::<S>)
    }
}

fn not_registered<S: System>() -> Error {
    Error::SystemNotRegistered {
        name: any::type_name::<S>(),
    }
}
