//! Realistic workload benchmarks.
//!
//! # Scenarios
//!
//! - **Particles**: many entities, simple components, short lifetimes

pub mod particles;

pub use particles::{ParticleConfig, ParticleScenario};

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Number of entities in this scenario.
    fn entity_count(&self) -> usize;

    /// Set up the scenario (create entities, register systems).
    fn setup(&mut self);

    /// Run one "frame" of the scenario.
    fn update(&mut self);
}
