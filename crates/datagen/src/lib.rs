//! Deterministic synthetic dataset generation for the Mixboard backend.
//!
//! In a production analog the weekly series would arrive from an upstream
//! MMM fitting pipeline; here it is generated once at startup from a seeded
//! RNG so every run (and every test) sees the same data for the same seed.

pub mod generator;

pub use generator::{generate, GeneratorConfig};
