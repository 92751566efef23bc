//! Event dispatch between producers and listeners.
//!
//! Events are queued by any number of producers and dispatched on the simulation thread, once per
//! tick, to the listeners registered for the event's kind. See [`Broker`].

pub mod broker;

use std::{fmt::Debug, hash::Hash};

pub use broker::{Broker, Listener};

/// An event that can be routed through a [`Broker`].
///
/// Events must be:
/// - `'static`: No borrowed data
/// - `Send`: Producers may live on other threads
///
/// Listeners subscribe to a [`Kind`](Event::Kind) rather than to the event type itself, so one
/// event enum can carry many kinds of notification.
pub trait Event: 'static + Send {
    /// The discriminant listeners subscribe to.
    type Kind: Copy + Eq + Hash + Debug;

    /// The kind of this event.
    fn kind(&self) -> Self::Kind;
}
