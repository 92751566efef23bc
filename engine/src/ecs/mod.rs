pub mod component;
pub mod entity;
pub mod error;
pub mod event;
pub mod signature;
pub mod system;
pub(crate) mod util;
pub mod world;

pub use component::Component;
pub use entity::Entity;
pub use error::{Error, Result};
pub use event::Event;
pub use signature::Signature;
pub use system::{Context, Handle, Interest, System};
pub use world::{Config, Id as WorldId, World};
