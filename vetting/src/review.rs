//! Review workflow for one educator application.
//!
//! A `ReviewState` owns the application record, the typed verification
//! checklist, the reviewer notes, and the event history. Approval is
//! gated on a fully verified checklist; rejection requires a reason.
//! Once decided, the checklist freezes, while notes stay writable as an
//! audit trail.

use chrono::Utc;
use tracing::info;

use crate::types::{
    ApplicationStatus, ChecklistItem, EducatorApplication, ReviewEvent, ReviewEventKind,
    ReviewNote, VerificationChecklist,
};

/// Error types for review operations.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// The application has already reached a terminal status
    #[error("Application already decided: {status}")]
    AlreadyDecided { status: ApplicationStatus },

    /// Approval attempted with unverified checklist items
    #[error("Checklist incomplete, missing: {missing:?}")]
    ChecklistIncomplete { missing: Vec<ChecklistItem> },

    /// Note body is blank
    #[error("Note body is empty")]
    EmptyNote,

    /// Rejection needs a non-blank reason
    #[error("Rejection requires a reason")]
    EmptyReason,
}

/// Review state for one application.
#[derive(Debug, Clone)]
pub struct ReviewState {
    application: EducatorApplication,
    checklist: VerificationChecklist,
    notes: Vec<ReviewNote>,
    events: Vec<ReviewEvent>,
}

impl ReviewState {
    /// Start reviewing a submitted application.
    pub fn new(application: EducatorApplication) -> Self {
        let submitted =
            ReviewEvent::recorded_at(application.submitted_at, ReviewEventKind::Submitted);
        Self {
            application,
            checklist: VerificationChecklist::default(),
            notes: Vec::new(),
            events: vec![submitted],
        }
    }

    /// Resume a review from imported parts (see [`crate::legacy`]).
    ///
    /// The old console kept no event history, so the timeline starts
    /// with the submission event only.
    pub fn resume(
        application: EducatorApplication,
        checklist: VerificationChecklist,
        notes: Vec<ReviewNote>,
    ) -> Self {
        let submitted =
            ReviewEvent::recorded_at(application.submitted_at, ReviewEventKind::Submitted);
        Self {
            application,
            checklist,
            notes,
            events: vec![submitted],
        }
    }

    pub fn application(&self) -> &EducatorApplication {
        &self.application
    }

    pub fn checklist(&self) -> &VerificationChecklist {
        &self.checklist
    }

    /// Notes in the order they were added.
    pub fn notes(&self) -> &[ReviewNote] {
        &self.notes
    }

    /// The full review history, oldest first.
    pub fn timeline(&self) -> Vec<&ReviewEvent> {
        let mut events: Vec<&ReviewEvent> = self.events.iter().collect();
        events.sort_by_key(|event| event.at);
        events
    }

    /// Add a reviewer note. Returns the note id.
    ///
    /// The first reviewer activity on a pending application moves it to
    /// `in_review`. Notes stay allowed after a decision.
    pub fn add_note(
        &mut self,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<String, ReviewError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ReviewError::EmptyNote);
        }

        let note = ReviewNote::new(author, body);
        let note_id = note.id.clone();
        self.events.push(ReviewEvent::new(ReviewEventKind::NoteAdded {
            note_id: note_id.clone(),
        }));
        self.notes.push(note);

        if !self.application.status.is_decided() {
            self.activate();
        }
        Ok(note_id)
    }

    /// Mark one checklist item. Frozen once a decision is made.
    pub fn set_checklist_item(
        &mut self,
        item: ChecklistItem,
        verified: bool,
    ) -> Result<(), ReviewError> {
        self.ensure_undecided()?;

        self.checklist.set(item, verified);
        self.events
            .push(ReviewEvent::new(ReviewEventKind::ChecklistItemSet {
                item,
                verified,
            }));
        self.activate();
        Ok(())
    }

    pub fn can_approve(&self) -> bool {
        !self.application.status.is_decided() && self.checklist.all_verified()
    }

    pub fn can_reject(&self) -> bool {
        !self.application.status.is_decided()
    }

    /// Approve the application. Requires every checklist item verified.
    pub fn approve(&mut self, reviewer: impl Into<String>) -> Result<(), ReviewError> {
        self.ensure_undecided()?;

        let missing = self.checklist.missing();
        if !missing.is_empty() {
            return Err(ReviewError::ChecklistIncomplete { missing });
        }

        self.decide(ApplicationStatus::Approved, Some(reviewer.into()));
        Ok(())
    }

    /// Reject the application. The reason is recorded as a note by the
    /// deciding reviewer.
    pub fn reject(
        &mut self,
        reviewer: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<(), ReviewError> {
        self.ensure_undecided()?;

        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(ReviewError::EmptyReason);
        }

        let reviewer = reviewer.into();
        let note = ReviewNote::new(reviewer.clone(), reason);
        self.events.push(ReviewEvent::new(ReviewEventKind::NoteAdded {
            note_id: note.id.clone(),
        }));
        self.notes.push(note);

        self.decide(ApplicationStatus::Rejected, Some(reviewer));
        Ok(())
    }

    /// The applicant withdraws. Allowed any time before a decision.
    pub fn withdraw(&mut self) -> Result<(), ReviewError> {
        self.ensure_undecided()?;
        self.application.decided_at = Some(Utc::now());
        self.transition(ApplicationStatus::Withdrawn);
        Ok(())
    }

    fn ensure_undecided(&self) -> Result<(), ReviewError> {
        if self.application.status.is_decided() {
            return Err(ReviewError::AlreadyDecided {
                status: self.application.status,
            });
        }
        Ok(())
    }

    fn decide(&mut self, to: ApplicationStatus, reviewer: Option<String>) {
        self.application.decided_at = Some(Utc::now());
        self.application.decided_by = reviewer;
        self.transition(to);
    }

    fn activate(&mut self) {
        if self.application.status == ApplicationStatus::Pending {
            self.transition(ApplicationStatus::InReview);
        }
    }

    fn transition(&mut self, to: ApplicationStatus) {
        let from = self.application.status;
        if from == to {
            return;
        }
        self.application.status = to;
        self.events
            .push(ReviewEvent::new(ReviewEventKind::StatusChanged { from, to }));
        info!(
            application_id = %self.application.id,
            from = %from,
            to = %to,
            "application status changed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_review() -> ReviewState {
        ReviewState::new(EducatorApplication::new(
            "Ada Calhoun",
            "ada@uni.example",
            "Example University",
        ))
    }

    fn verify_all(review: &mut ReviewState) {
        for item in ChecklistItem::ALL {
            review.set_checklist_item(item, true).unwrap();
        }
    }

    #[test]
    fn test_approve_gated_on_checklist() {
        let mut review = pending_review();
        review.set_checklist_item(ChecklistItem::Identity, true).unwrap();
        assert!(!review.can_approve());

        let err = review.approve("rev-1").unwrap_err();
        match err {
            ReviewError::ChecklistIncomplete { missing } => {
                assert_eq!(
                    missing,
                    vec![
                        ChecklistItem::Institution,
                        ChecklistItem::Credentials,
                        ChecklistItem::ConductPolicy,
                    ]
                );
            }
            other => panic!("expected ChecklistIncomplete, got {other:?}"),
        }

        verify_all(&mut review);
        assert!(review.can_approve());
        review.approve("rev-1").unwrap();

        let application = review.application();
        assert_eq!(application.status, ApplicationStatus::Approved);
        assert_eq!(application.decided_by.as_deref(), Some("rev-1"));
        assert!(application.decided_at.is_some());
    }

    #[test]
    fn test_decided_applications_refuse_further_decisions() {
        let mut review = pending_review();
        verify_all(&mut review);
        review.approve("rev-1").unwrap();

        assert!(matches!(
            review.approve("rev-2"),
            Err(ReviewError::AlreadyDecided {
                status: ApplicationStatus::Approved
            })
        ));
        assert!(matches!(
            review.reject("rev-2", "too late"),
            Err(ReviewError::AlreadyDecided { .. })
        ));
        assert!(matches!(
            review.withdraw(),
            Err(ReviewError::AlreadyDecided { .. })
        ));
        // Checklist is frozen, notes are not.
        assert!(matches!(
            review.set_checklist_item(ChecklistItem::Identity, false),
            Err(ReviewError::AlreadyDecided { .. })
        ));
        review.add_note("rev-2", "post-decision context").unwrap();
    }

    #[test]
    fn test_reject_requires_reason_and_records_note() {
        let mut review = pending_review();
        assert!(matches!(
            review.reject("rev-1", "   "),
            Err(ReviewError::EmptyReason)
        ));

        review.reject("rev-1", "Institution email bounced").unwrap();
        assert_eq!(review.application().status, ApplicationStatus::Rejected);
        assert_eq!(review.notes().len(), 1);
        assert_eq!(review.notes()[0].author, "rev-1");
        assert_eq!(review.notes()[0].body, "Institution email bounced");
    }

    #[test]
    fn test_first_activity_moves_pending_to_in_review() {
        let mut review = pending_review();
        assert_eq!(review.application().status, ApplicationStatus::Pending);

        review.add_note("rev-1", "Checking institution registry").unwrap();
        assert_eq!(review.application().status, ApplicationStatus::InReview);

        // Also via the checklist on a fresh application.
        let mut review = pending_review();
        review
            .set_checklist_item(ChecklistItem::Institution, true)
            .unwrap();
        assert_eq!(review.application().status, ApplicationStatus::InReview);
    }

    #[test]
    fn test_blank_notes_rejected() {
        let mut review = pending_review();
        assert!(matches!(
            review.add_note("rev-1", "  \n "),
            Err(ReviewError::EmptyNote)
        ));
        assert!(review.notes().is_empty());
        // A refused note is not reviewer activity.
        assert_eq!(review.application().status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_timeline_is_chronological() {
        let mut review = pending_review();
        review.add_note("rev-1", "Starting checks").unwrap();
        review
            .set_checklist_item(ChecklistItem::Identity, true)
            .unwrap();
        verify_all(&mut review);
        review.approve("rev-1").unwrap();

        let timeline = review.timeline();
        assert!(matches!(timeline[0].kind, ReviewEventKind::Submitted));
        assert!(timeline.windows(2).all(|pair| pair[0].at <= pair[1].at));
        assert!(matches!(
            timeline.last().unwrap().kind,
            ReviewEventKind::StatusChanged {
                to: ApplicationStatus::Approved,
                ..
            }
        ));
    }

    #[test]
    fn test_resume_from_imported_parts() {
        let legacy = crate::legacy::decode_legacy_notes(
            r#"{ "notes": ["ported over"], "__metadata": { "identity": true } }"#,
        );
        let application =
            EducatorApplication::new("Ada Calhoun", "ada@uni.example", "Example University");
        let mut review = ReviewState::resume(application, legacy.checklist, legacy.notes);

        assert_eq!(review.notes().len(), 1);
        assert!(review.checklist().identity);
        assert!(!review.can_approve());

        for item in ChecklistItem::ALL {
            review.set_checklist_item(item, true).unwrap();
        }
        review.approve("rev-1").unwrap();
        assert_eq!(review.application().status, ApplicationStatus::Approved);
    }

    #[test]
    fn test_withdraw_before_decision() {
        let mut review = pending_review();
        review.withdraw().unwrap();
        assert_eq!(review.application().status, ApplicationStatus::Withdrawn);
        assert!(review.application().decided_at.is_some());
        assert!(review.application().decided_by.is_none());
        assert!(!review.can_reject());
    }
}
