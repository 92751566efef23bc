//! Deferred command buffer for structural changes.
//!
//! A running system iterates its interest set, so it must not change which components an
//! entity holds or destroy entities while doing so. Instead it queues [`Command`]s through
//! [`Commands`], and the world applies them once the system returns.
//!
//! # Lifecycle
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ world.run_system(handle, delta)                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  System::update ──push──► CommandBuffer                  │
//! │                                 │                        │
//! │                     (after update returns)               │
//! │                                 ▼                        │
//! │                  world.flush_commands() ──► World        │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::any;

use crossbeam::queue::SegQueue;

use crate::ecs::{
    component::Component,
    entity::Entity,
    error::Result,
    world::World,
};

/// A structural change applied to a component of some type, erased to a closure over the world.
type Apply = Box<dyn FnOnce(&mut World) -> Result<()>>;

/// A deferred entity command.
pub enum Command {
    /// Destroy an entity, dropping all its components.
    Destroy {
        /// The entity to destroy.
        entity: Entity,
    },

    /// Attach a component value to an entity.
    AddComponent {
        /// The target entity.
        entity: Entity,
        /// The Rust type name of the component, for diagnostics.
        name: &'static str,
        /// Performs the attach.
        apply: Apply,
    },

    /// Detach a component from an entity, dropping its value.
    RemoveComponent {
        /// The target entity.
        entity: Entity,
        /// The Rust type name of the component, for diagnostics.
        name: &'static str,
        /// Performs the detach.
        apply: Apply,
    },
}

impl Command {
    /// Apply this command through the world facade.
    pub fn apply(self, world: &mut World) -> Result<()> {
        match self {
            Command::Destroy { entity } => world.destroy_entity(entity),
            Command::AddComponent { apply, .. } | Command::RemoveComponent { apply, .. } => {
                apply(world)
            }
        }
    }

    /// The entity this command targets.
    pub fn entity(&self) -> Entity {
        match self {
            Command::Destroy { entity }
            | Command::AddComponent { entity, .. }
            | Command::RemoveComponent { entity, .. } => *entity,
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Destroy { entity } => write!(f, "Destroy({entity})"),
            Command::AddComponent { entity, name, .. } => write!(f, "AddComponent({entity}, {name})"),
            Command::RemoveComponent { entity, name, .. } => {
                write!(f, "RemoveComponent({entity}, {name})")
            }
        }
    }
}

/// A FIFO queue of deferred commands.
///
/// Pushing only needs a shared reference, so systems can queue commands while the world lends
/// out component access.
#[derive(Default)]
pub struct CommandBuffer {
    commands: SegQueue<Command>,
}

impl CommandBuffer {
    /// Create a new empty command buffer.
    pub fn new() -> Self {
        Self {
            commands: SegQueue::new(),
        }
    }

    /// Push a command to the back of the buffer.
    #[inline]
    pub fn push(&self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all commands from the buffer, in the order they were pushed.
    pub fn drain(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(self.commands.len());
        while let Some(command) = self.commands.pop() {
            commands.push(command);
        }
        commands
    }

    /// The number of queued commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A typed front end for queuing commands into a [`CommandBuffer`].
#[derive(Clone, Copy)]
pub struct Commands<'a> {
    buffer: &'a CommandBuffer,
}

impl<'a> Commands<'a> {
    /// Create a command queue writing into `buffer`.
    #[inline]
    pub fn new(buffer: &'a CommandBuffer) -> Self {
        Self { buffer }
    }

    /// Queue the destruction of an entity.
    pub fn destroy(&self, entity: Entity) {
        self.buffer.push(Command::Destroy { entity });
    }

    /// Queue attaching `value` to an entity.
    pub fn add_component<C: Component>(&self, entity: Entity, value: C) {
        self.buffer.push(Command::AddComponent {
            entity,
            name: any::type_name::<C>(),
            apply: Box::new(move |world| world.add_component(entity, value)),
        });
    }

    /// Queue detaching the `C` component of an entity.
    pub fn remove_component<C: Component>(&self, entity: Entity) {
        self.buffer.push(Command::RemoveComponent {
            entity,
            name: any::type_name::<C>(),
            apply: Box::new(move |world| world.remove_component::<C>(entity).map(drop)),
        });
    }
}
