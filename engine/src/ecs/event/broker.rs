//! FIFO event queue with per-kind listeners.
//!
//! A [`Broker`] owns an unbounded channel of events. Producers hold cheap, cloneable
//! [`Sender`]s obtained from [`Broker::sender`] and may enqueue from any thread. The owner calls
//! [`Broker::process`] once per tick, which hands each queued event, in the order it was sent, to
//! every listener registered for its kind.
//!
//! Listeners receive a mutable context of type `C` alongside the event, typically the
//! [`World`](crate::ecs::world::World) or some host state, so that they can react without
//! capturing shared references.
//!
//! # Example
//!
//! ```rust,ignore
//! use rusty_ecs::ecs::event::{Broker, Event};
//!
//! #[derive(Debug)]
//! enum Input { Quit, Key(char) }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum InputKind { Quit, Key }
//!
//! impl Event for Input {
//!     type Kind = InputKind;
//!     fn kind(&self) -> InputKind {
//!         match self {
//!             Input::Quit => InputKind::Quit,
//!             Input::Key(_) => InputKind::Key,
//!         }
//!     }
//! }
//!
//! let mut broker = Broker::<Input, bool>::new();
//! broker.add_listener(InputKind::Quit, |_, running| *running = false);
//!
//! let sender = broker.sender();
//! std::thread::spawn(move || sender.send(Input::Quit).ok());
//!
//! let mut running = true;
//! broker.process(&mut running);
//! ```

use std::collections::HashMap;

use crossbeam::channel::{self, Receiver, Sender};
use log::trace;

use crate::ecs::event::Event;

/// A callback invoked for every dispatched event of the kind it was registered for.
pub type Listener<E, C> = Box<dyn FnMut(&E, &mut C)>;

/// Queue of events of type `E`, dispatched to listeners with a context of type `C`.
pub struct Broker<E: Event, C = ()> {
    sender: Sender<E>,
    receiver: Receiver<E>,
    listeners: HashMap<E::Kind, Vec<Listener<E, C>>>,
}

impl<E: Event, C> Broker<E, C> {
    /// Create a broker with an empty queue and no listeners.
    pub fn new() -> Self {
        let (sender, receiver) = channel::unbounded();
        Self {
            sender,
            receiver,
            listeners: HashMap::new(),
        }
    }

    /// Register a listener for one kind of event. Listeners of the same kind are called in
    /// registration order.
    pub fn add_listener<F>(&mut self, kind: E::Kind, listener: F)
    where
        F: FnMut(&E, &mut C) + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(listener));
    }

    /// The number of listeners registered for a kind.
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Queue an event for the next [`process`](Self::process).
    pub fn send(&self, event: E) {
        // The broker holds the receiver, so the channel cannot be disconnected here.
        let _ = self.sender.send(event);
    }

    /// A producer handle that can be moved to other threads.
    ///
    /// Sending fails once the broker has been dropped.
    pub fn sender(&self) -> Sender<E> {
        self.sender.clone()
    }

    /// The number of queued events.
    #[inline]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Dispatch the events queued when this call starts, in FIFO order, and return how many were
    /// dispatched.
    ///
    /// Events sent while processing, by a listener or another thread, wait for the next call.
    /// An event with no listener for its kind is dropped.
    pub fn process(&mut self, ctx: &mut C) -> usize {
        let pending = self.receiver.len();
        for event in self.receiver.try_iter().take(pending) {
            match self.listeners.get_mut(&event.kind()) {
                Some(listeners) => {
                    for listener in listeners.iter_mut() {
                        listener(&event, ctx);
                    }
                }
                None => trace!("no listener for {:?} event", event.kind()),
            }
        }
        pending
    }
}

impl<E: Event, C> Default for Broker<E, C> {
    fn default() -> Self {
        Self::new()
    }
}
