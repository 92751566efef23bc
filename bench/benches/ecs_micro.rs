//! ECS microbenchmarks using Criterion.
//!
//! These benchmarks measure individual ECS operations in isolation:
//! - Entity create/destroy
//! - Component attach/detach
//! - Dense store iteration and interest set iteration
//! - Signature changes fanned out to many systems

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use rusty_ecs::ecs::{Config, Entity, World};
use rusty_ecs_bench::components::*;
use rusty_ecs_macros::System;

fn world_for(n: usize) -> World {
    let mut world = World::with_config(Config::default().with_max_entities(n));
    register_all(&mut world).unwrap();
    world
}

fn populated(n: usize) -> (World, Vec<Entity>) {
    let mut world = world_for(n);
    let entities: Vec<_> = (0..n)
        .map(|_| {
            let entity = world.create_entity().unwrap();
            world.add_component(entity, Position::default()).unwrap();
            world.add_component(entity, Velocity { x: 1.0, y: 2.0, z: 3.0 }).unwrap();
            entity
        })
        .collect();
    (world, entities)
}

// =============================================================================
// Lifecycle Benchmarks
// =============================================================================

fn bench_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");

    for count in [100, 1_000, 5_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("create", count), &count, |b, &n| {
            b.iter(|| {
                let mut world = world_for(n);
                for _ in 0..n {
                    black_box(world.create_entity().unwrap());
                }
            });
        });

        // Destroy in shuffled order so the free queue is not sequential
        group.bench_with_input(BenchmarkId::new("destroy_shuffled", count), &count, |b, &n| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            b.iter_batched(
                || {
                    let (world, mut entities) = populated(n);
                    entities.shuffle(&mut rng);
                    (world, entities)
                },
                |(mut world, entities)| {
                    for entity in entities {
                        world.destroy_entity(entity).unwrap();
                    }
                    world
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Attach / Detach Benchmarks
// =============================================================================

fn bench_attach_detach(c: &mut Criterion) {
    let mut group = c.benchmark_group("attach");

    for count in [100, 1_000, 5_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("attach_detach", count), &count, |b, &n| {
            let (mut world, entities) = populated(n);
            b.iter(|| {
                for &entity in &entities {
                    world.add_component(entity, Lifetime::default()).unwrap();
                }
                for &entity in &entities {
                    black_box(world.remove_component::<Lifetime>(entity).unwrap());
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Iteration Benchmarks
// =============================================================================

#[derive(System, Default)]
struct Mover;

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for count in [1_000, 5_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("store_dense", count), &count, |b, &n| {
            let (world, _) = populated(n);
            b.iter(|| {
                let store = world.store::<Velocity>().unwrap();
                let sum: f32 = store.values().iter().map(|v| v.x + v.y + v.z).sum();
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("interest_lookup", count), &count, |b, &n| {
            let (mut world, _) = populated(n);
            let mover = world.register_system::<Mover>().unwrap();
            let signature = world.signature_of::<(Position, Velocity)>().unwrap();
            world.set_system_signature::<Mover>(signature).unwrap();
            b.iter(|| {
                let mut sum = 0.0;
                for entity in world.entities_of(mover).unwrap() {
                    sum += world.get_component::<Velocity>(entity).unwrap().x;
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Signature Fan-out Benchmarks
// =============================================================================

/// A system that only observes, one distinct type per `N`.
#[derive(System, Default)]
struct Watcher<const N: usize>;

fn register_watcher<const N: usize>(world: &mut World) {
    world.register_system::<Watcher<N>>().unwrap();
    let signature = world.signature_of::<(Position, Color)>().unwrap();
    world.set_system_signature::<Watcher<N>>(signature).unwrap();
}

macro_rules! watchers {
    ($($n:literal)*) => { [$(register_watcher::<$n> as fn(&mut World)),*] };
}

fn register_watchers(world: &mut World, count: usize) {
    let all = watchers!(
        0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31
    );
    for register in all.iter().take(count) {
        register(world);
    }
}

fn bench_signature_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature_change");

    for systems in [1usize, 8, 32] {
        group.bench_with_input(BenchmarkId::new("systems", systems), &systems, |b, &s| {
            let (mut world, entities) = populated(1_000);
            register_watchers(&mut world, s);
            b.iter(|| {
                for &entity in &entities {
                    world.add_component(entity, Color::default()).unwrap();
                    world.remove_component::<Color>(entity).unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lifecycle,
    bench_attach_detach,
    bench_iteration,
    bench_signature_change
);
criterion_main!(benches);
