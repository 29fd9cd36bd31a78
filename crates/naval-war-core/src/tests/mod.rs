//! Crate-level tests.
//!
//! - `determinism.rs`: same seed and same commands give the same world
//! - `integration.rs`: end-to-end scenarios through [`Simulation`]
//! - `helpers.rs`: [`TestWorld`] and simulation setup shared with unit tests
//!
//! [`Simulation`]: crate::simulation::Simulation
//! [`TestWorld`]: helpers::TestWorld

pub mod helpers;
mod integration;
