//! Educator application review for the Praxis admin console
//!
//! Admins vet educators before they can assign simulations to students.
//! This crate owns the typed review state: the application record, a
//! verification checklist, free-text reviewer notes, and an event
//! timeline. Approval is gated on the checklist; rejection requires a
//! recorded reason.
//!
//! Checklist and notes are distinct persisted fields. The retired
//! console overloaded one text column for both; [`legacy`] decodes those
//! blobs during import and nothing ever writes that shape again.

pub mod legacy;
pub mod review;
pub mod types;

// Re-export main types
pub use legacy::{decode_legacy_notes, LegacyReview};
pub use review::{ReviewError, ReviewState};
pub use types::{
    ApplicationStatus, ChecklistItem, EducatorApplication, ReviewEvent, ReviewEventKind,
    ReviewNote, VerificationChecklist,
};
