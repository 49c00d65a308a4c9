//! Simulation program domain logic for the Praxis platform
//!
//! This crate is the typed, unit-tested home of the client-side domain
//! rules for job simulations. It owns the record types, the builder
//! wizard's step dependency chain, field-completeness predicates, the
//! progress tracker that gates navigation and publishing, and the student
//! library catalog filters.
//!
//! Everything here is pure and synchronous; fetching and mutating records
//! lives in the `studio` crate.
//!
//! # Key Components
//!
//! - [`Simulation`]: the aggregate record a wizard edits, one field group
//!   per step
//! - [`Step`]: the nine wizard steps and their dependency chain, with the
//!   conditional certification edge
//! - [`BuilderProgress`]: completed-step derivation, `can_publish`, and
//!   navigation gating
//! - [`CatalogFilter`] / [`paginate`]: student library filtering and
//!   client-side pagination
//!
//! # Example
//!
//! ```ignore
//! use blueprint::{BuilderProgress, Simulation, Step};
//!
//! let sim: Simulation = serde_json::from_str(&payload)?;
//! let progress = BuilderProgress::evaluate(&sim);
//!
//! if progress.can_publish() {
//!     // all steps through analytics are complete
//! }
//! assert!(progress.can_navigate_to(Step::Metadata));
//! ```

pub mod catalog;
pub mod completeness;
pub mod progress;
pub mod steps;
pub mod text;
pub mod types;

// Re-export main types
pub use catalog::{filter_catalog, paginate, CatalogFilter, Page};
pub use completeness::{step_fields_complete, task_is_meaningful};
pub use progress::BuilderProgress;
pub use steps::Step;
pub use text::{is_blank, is_placeholder_title, rich_text_is_blank, visible_text};
pub use types::{
    SkillRef, Simulation, SimulationTask, TaskStatus, Visibility, ANALYTICS_VIEWED_TAG,
};
