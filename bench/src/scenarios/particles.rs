//! Particle system benchmark scenario.
//!
//! Simulates a particle pool with:
//! - Components: Position, Velocity, Lifetime, Color
//! - Systems: movement, lifetime decay with fade, destruction of expired particles
//! - Expired particles are replaced every frame so the pool stays full
//!
//! This scenario tests:
//! - Interest set iteration with random component access
//! - Entity create/destroy throughput and identifier reuse
//! - Deferred command flushing

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_ecs::ecs::{Config, Context, Error, Handle, System, World};

use crate::components::{self, Color, Lifetime, Position, Velocity};
use crate::scenarios::Scenario;

/// Configuration for the particle benchmark.
pub struct ParticleConfig {
    /// Number of particles kept alive.
    pub particle_count: usize,
    /// Simulated delta time per frame.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 5_000,
            delta_time: 1.0 / 60.0, // 60 FPS
            seed: 12345,
        }
    }
}

/// System: Update particle positions based on velocity.
#[derive(Default)]
pub struct Movement;

impl System for Movement {
    fn update(&mut self, ctx: &mut Context<'_>, delta: f32) {
        for entity in ctx.entities() {
            let Ok(&vel) = ctx.get::<Velocity>(entity) else {
                continue;
            };
            if let Ok(pos) = ctx.get_mut::<Position>(entity) {
                pos.x += vel.x * delta;
                pos.y += vel.y * delta;
                pos.z += vel.z * delta;
            }
        }
    }
}

/// System: Decay lifetimes, fade colors and queue expired particles for destruction.
#[derive(Default)]
pub struct Decay;

impl System for Decay {
    fn update(&mut self, ctx: &mut Context<'_>, delta: f32) {
        for entity in ctx.entities() {
            let Ok(lifetime) = ctx.get_mut::<Lifetime>(entity) else {
                continue;
            };
            lifetime.remaining -= delta;
            let remaining = lifetime.remaining;
            let alpha = (remaining / lifetime.total).max(0.0);

            if let Ok(color) = ctx.get_mut::<Color>(entity) {
                color.a = alpha;
            }
            if remaining <= 0.0 {
                ctx.commands().destroy(entity);
            }
        }
    }
}

/// Particle pool benchmark.
pub struct ParticleScenario {
    config: ParticleConfig,
    rng: ChaCha8Rng,
    world: World,
    systems: Option<(Handle<Movement>, Handle<Decay>)>,
}

impl ParticleScenario {
    pub fn new() -> Self {
        Self::with_config(ParticleConfig::default())
    }

    pub fn with_config(config: ParticleConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = World::with_config(Config::default().with_max_entities(config.particle_count));
        Self {
            config,
            rng,
            world,
            systems: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn register(&mut self) -> Result<(Handle<Movement>, Handle<Decay>), Error> {
        components::register_all(&mut self.world)?;

        let movement = self.world.register_system::<Movement>()?;
        let signature = self.world.signature_of::<(Position, Velocity)>()?;
        self.world.set_system_signature::<Movement>(signature)?;

        let decay = self.world.register_system::<Decay>()?;
        let signature = self.world.signature_of::<(Lifetime, Color)>()?;
        self.world.set_system_signature::<Decay>(signature)?;

        Ok((movement, decay))
    }

    /// Create particles until the pool is full.
    fn refill(&mut self) -> Result<usize, Error> {
        let mut created = 0;
        while self.world.entity_count() < self.config.particle_count {
            let entity = self.world.create_entity()?;
            let rng = &mut self.rng;
            self.world.add_component(
                entity,
                Position {
                    x: rng.gen_range(-100.0..100.0),
                    y: rng.gen_range(-100.0..100.0),
                    z: rng.gen_range(-100.0..100.0),
                },
            )?;
            self.world.add_component(
                entity,
                Velocity {
                    x: rng.gen_range(-10.0..10.0),
                    y: rng.gen_range(-10.0..10.0),
                    z: rng.gen_range(-10.0..10.0),
                },
            )?;
            self.world.add_component(
                entity,
                Lifetime {
                    remaining: rng.gen_range(0.1..2.0),
                    total: 2.0,
                },
            )?;
            self.world.add_component(
                entity,
                Color {
                    r: rng.gen_range(0.0..1.0),
                    g: rng.gen_range(0.0..1.0),
                    b: rng.gen_range(0.0..1.0),
                    a: 1.0,
                },
            )?;
            created += 1;
        }
        Ok(created)
    }

    /// Run one frame, returning the number of particles replaced.
    pub fn step(&mut self) -> Result<usize, Error> {
        let Some((movement, decay)) = self.systems else {
            return Ok(0);
        };
        let delta = self.config.delta_time;
        self.world.run_system(movement, delta)?;
        self.world.run_system(decay, delta)?;
        self.refill()
    }
}

impl Default for ParticleScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ParticleScenario {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn entity_count(&self) -> usize {
        self.world.entity_count()
    }

    fn setup(&mut self) {
        let systems = self.register().expect("particle schema registers");
        self.systems = Some(systems);
        self.refill().expect("particle pool fits the world");
    }

    fn update(&mut self) {
        self.step().expect("particle frame runs");
    }
}
