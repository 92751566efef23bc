//! Benchmark utilities for the `rusty_ecs` runtime.
//!
//! - **Microbenchmarks**: individual operations (create/destroy, attach/detach, store iteration,
//!   signature fan-out to many systems)
//! - **Scenario benchmarks**: a particle workload that churns entities every frame
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_ecs_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_ecs_bench -- attach
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod scenarios;
