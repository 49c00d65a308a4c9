//! Persistence layer for simulation records.
//!
//! Provides a trait-based interface over the platform API:
//! - REST client against the real API
//! - In-memory mock for testing

pub mod mock;
pub mod rest;
pub mod traits;

pub use mock::MockStore;
pub use rest::RestStore;
pub use traits::{SimulationPatch, SimulationStore, StoreError};
