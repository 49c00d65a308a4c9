//! Educator application records and review primitives.
//!
//! The verification checklist and the reviewer notes are distinct typed
//! fields. The retired admin console kept both inside one free-text
//! column; [`crate::legacy`] decodes that shape during imports, but
//! nothing here ever writes it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// An educator's request for access to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct EducatorApplication {
    pub id: String,
    pub educator_name: String,
    pub email: String,
    pub institution: String,
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub motivation: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub decided_at: Option<DateTime<Utc>>,
    /// Reviewer who made the decision
    #[serde(default)]
    pub decided_by: Option<String>,
}

impl EducatorApplication {
    /// Create a freshly submitted application.
    pub fn new(
        educator_name: impl Into<String>,
        email: impl Into<String>,
        institution: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            educator_name: educator_name.into(),
            email: email.into(),
            institution: institution.into(),
            role_title: None,
            motivation: None,
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
            decided_at: None,
            decided_by: None,
        }
    }

    pub fn with_role_title(mut self, role_title: impl Into<String>) -> Self {
        self.role_title = Some(role_title.into());
        self
    }

    pub fn with_motivation(mut self, motivation: impl Into<String>) -> Self {
        self.motivation = Some(motivation.into());
        self
    }
}

/// Where an application stands in the review flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted, no reviewer activity yet
    #[default]
    Pending,
    /// A reviewer has started working on it
    InReview,
    Approved,
    Rejected,
    /// Withdrawn by the applicant
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Whether the review has reached a terminal state.
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Withdrawn)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One verification a reviewer performs before approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    /// Applicant is who they say they are
    Identity,
    /// Institution exists and employs the applicant
    Institution,
    /// Teaching credentials check out
    Credentials,
    /// Conduct policy acknowledged
    ConductPolicy,
}

impl ChecklistItem {
    pub const ALL: [ChecklistItem; 4] = [
        ChecklistItem::Identity,
        ChecklistItem::Institution,
        ChecklistItem::Credentials,
        ChecklistItem::ConductPolicy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Institution => "institution",
            Self::Credentials => "credentials",
            Self::ConductPolicy => "conduct_policy",
        }
    }
}

impl std::fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification state across all checklist items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct VerificationChecklist {
    #[serde(default)]
    pub identity: bool,
    #[serde(default)]
    pub institution: bool,
    #[serde(default)]
    pub credentials: bool,
    #[serde(default)]
    pub conduct_policy: bool,
}

impl VerificationChecklist {
    pub fn is_verified(&self, item: ChecklistItem) -> bool {
        match item {
            ChecklistItem::Identity => self.identity,
            ChecklistItem::Institution => self.institution,
            ChecklistItem::Credentials => self.credentials,
            ChecklistItem::ConductPolicy => self.conduct_policy,
        }
    }

    pub fn set(&mut self, item: ChecklistItem, verified: bool) {
        match item {
            ChecklistItem::Identity => self.identity = verified,
            ChecklistItem::Institution => self.institution = verified,
            ChecklistItem::Credentials => self.credentials = verified,
            ChecklistItem::ConductPolicy => self.conduct_policy = verified,
        }
    }

    pub fn all_verified(&self) -> bool {
        ChecklistItem::ALL.iter().all(|item| self.is_verified(*item))
    }

    /// Items still unverified, in fixed order.
    pub fn missing(&self) -> Vec<ChecklistItem> {
        ChecklistItem::ALL
            .iter()
            .copied()
            .filter(|item| !self.is_verified(*item))
            .collect()
    }
}

/// Free-text note a reviewer leaves on an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ReviewNote {
    pub id: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewNote {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author: author.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

/// One entry in an application's review history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ReviewEvent {
    pub id: String,
    pub at: DateTime<Utc>,
    pub kind: ReviewEventKind,
}

impl ReviewEvent {
    pub fn new(kind: ReviewEventKind) -> Self {
        Self::recorded_at(Utc::now(), kind)
    }

    /// An event with an explicit timestamp, for reconstructed histories.
    pub fn recorded_at(at: DateTime<Utc>, kind: ReviewEventKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            at,
            kind,
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReviewEventKind {
    /// Application entered the queue
    Submitted,

    /// A note was added
    NoteAdded { note_id: String },

    /// A checklist item was marked
    ChecklistItemSet {
        item: ChecklistItem,
        verified: bool,
    },

    /// Status transition
    StatusChanged {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&ApplicationStatus::InReview).unwrap();
        assert_eq!(json, r#""in_review""#);
        assert!(ApplicationStatus::Withdrawn.is_decided());
        assert!(!ApplicationStatus::InReview.is_decided());
    }

    #[test]
    fn test_checklist_tracks_missing_items() {
        let mut checklist = VerificationChecklist::default();
        assert_eq!(checklist.missing(), ChecklistItem::ALL.to_vec());

        checklist.set(ChecklistItem::Identity, true);
        checklist.set(ChecklistItem::Credentials, true);
        assert!(!checklist.all_verified());
        assert_eq!(
            checklist.missing(),
            vec![ChecklistItem::Institution, ChecklistItem::ConductPolicy]
        );

        for item in ChecklistItem::ALL {
            checklist.set(item, true);
        }
        assert!(checklist.all_verified());
        assert!(checklist.missing().is_empty());
    }

    #[test]
    fn test_event_kind_wire_shape() {
        let event = ReviewEventKind::ChecklistItemSet {
            item: ChecklistItem::ConductPolicy,
            verified: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "checklist_item_set");
        assert_eq!(json["item"], "conduct_policy");
        assert_eq!(json["verified"], true);
    }

    #[test]
    fn test_new_application_is_pending() {
        let application =
            EducatorApplication::new("Ada Calhoun", "ada@uni.example", "Example University")
                .with_role_title("Lecturer")
                .with_motivation("Bringing simulations to the finance cohort");
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert!(application.decided_at.is_none());
        assert_eq!(application.role_title.as_deref(), Some("Lecturer"));
        assert!(application.motivation.is_some());
    }
}
