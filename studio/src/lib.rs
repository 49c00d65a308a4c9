//! Praxis Studio - Builder Session Layer
//!
//! Provides the async plumbing between the wizard UI and the platform
//! API:
//! - Trait-based record stores (REST, in-memory mock)
//! - Builder sessions with immutable snapshots over a watch channel
//! - Refetch-on-mutation: saves go to the store, never the local copy
//! - Out-of-order fetch responses discarded by sequence number
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            StudioRegistry               │
//! │   (one shared session per record id)    │
//! └────────────────┬────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │            BuilderSession               │
//! │  refresh / save_fields / publish        │
//! │  watch::Sender<SessionSnapshot>         │
//! └────────┬───────────────────┬────────────┘
//!          ▼                   ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │ SimulationStore │   │ BuilderProgress │
//! │ (Rest / Mock)   │   │ (blueprint)     │
//! └─────────────────┘   └─────────────────┘
//! ```

pub mod config;
pub mod registry;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use config::StudioConfig;
pub use registry::StudioRegistry;
pub use session::{BuilderSession, SessionError, SessionPhase, SessionSnapshot};
pub use store::{MockStore, RestStore, SimulationPatch, SimulationStore, StoreError};
