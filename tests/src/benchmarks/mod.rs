//! # Garden Contract Benchmarks
//!
//! Criterion groups per subsystem, wired up in `benches/garden_benchmarks.rs`.

pub mod gc_01_address_derivation;
pub mod gc_02_state_transition;
