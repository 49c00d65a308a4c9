//! Record types for the simulation builder.
//!
//! These are the typed counterparts of the records the platform API serves.
//! A simulation is created empty (every field null) the moment a builder
//! opens the metadata step, so everything except `id` is optional and the
//! deserializers tolerate absent or null fields.
//!
//! Matches TypeScript `Simulation` / `SimulationTask` in simulation.model.ts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Sentinel tag stored in `analytics_tags` once the builder has opened the
/// analytics step. Presence of the tag is what marks the step viewed; there
/// is no dedicated boolean column.
pub const ANALYTICS_VIEWED_TAG: &str = "__analytics_viewed__";

/// Who can see a simulation program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Still being authored, visible to the owning enterprise only
    Draft,
    /// Visible inside the owning enterprise
    Internal,
    /// Visible to students of assigned educators
    EducatorAssigned,
    /// Listed in the student library
    Public,
    /// Reachable by direct link only
    Private,
    /// Retired from all listings
    Archived,
}

impl Visibility {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Internal => "internal",
            Self::EducatorAssigned => "educator_assigned",
            Self::Public => "public",
            Self::Private => "private",
            Self::Archived => "archived",
        }
    }

    /// Parse a wire value; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "internal" => Some(Self::Internal),
            "educator_assigned" => Some(Self::EducatorAssigned),
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Authoring status of one task inside a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Still missing content
    #[default]
    Incomplete,
    /// Author marked the task ready for students
    Ready,
}

/// A skill the simulation teaches, as referenced from the outcomes step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SkillRef {
    /// Display name of the skill
    pub skill_name: String,
}

/// One task of a simulation program.
///
/// The builder seeds new tasks with a placeholder title ("New Task 1", ...);
/// a task only counts toward step completion once it has real content, see
/// [`crate::completeness::task_is_meaningful`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SimulationTask {
    /// Task title shown in the student task list
    #[serde(default)]
    pub title: Option<String>,
    /// Introduction shown before the student starts
    #[serde(default)]
    pub introduction: Option<String>,
    /// The actual work instructions
    #[serde(default)]
    pub instructions: Option<String>,
    /// Authoring status; unknown wire values decode as incomplete
    #[serde(default, deserialize_with = "de_task_status")]
    pub status: TaskStatus,
    /// Position within the simulation
    #[serde(default)]
    pub order_index: i64,
}

/// The simulation program record — the aggregate the builder wizard edits.
///
/// Field groups correspond one-to-one to wizard steps; each step's form
/// persists its own group independently, so any subset of fields may be
/// populated at any time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Simulation {
    /// Record identifier
    pub id: String,

    // Metadata step
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub program_type: Option<String>,

    // Outcomes step
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
    #[serde(default)]
    pub simulation_skills: Vec<SkillRef>,

    // Tasks step
    #[serde(default)]
    pub simulation_tasks: Vec<SimulationTask>,

    // Assessment step
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    /// Rich text (WYSIWYG HTML)
    #[serde(default)]
    pub grading_criteria: Option<String>,

    // Branding step
    #[serde(default)]
    pub company_logo_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    /// Rich text (WYSIWYG HTML)
    #[serde(default)]
    pub about_company: Option<String>,
    /// Rich text (WYSIWYG HTML)
    #[serde(default)]
    pub why_work_here: Option<String>,

    // Certification step; a null `certificate_enabled` means enabled
    #[serde(default)]
    pub certificate_enabled: Option<bool>,
    #[serde(default)]
    pub certificate_director_name: Option<String>,

    // Visibility step; unknown wire values decode as unset
    #[serde(default, deserialize_with = "de_visibility")]
    pub visibility: Option<Visibility>,

    // Analytics step
    #[serde(default)]
    pub analytics_tags: Vec<String>,

    // Bookkeeping
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Simulation {
    /// Create an empty record, the state a simulation is born in.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Whether the analytics step has been viewed (sentinel tag present).
    pub fn analytics_viewed(&self) -> bool {
        self.analytics_tags.iter().any(|t| t == ANALYTICS_VIEWED_TAG)
    }

    /// Record that the analytics step was viewed. Idempotent.
    pub fn mark_analytics_viewed(&mut self) {
        if !self.analytics_viewed() {
            self.analytics_tags.push(ANALYTICS_VIEWED_TAG.to_string());
        }
    }
}

/// Lenient visibility decoder: unknown or non-string values become `None`
/// so a record written by a newer server version still loads.
fn de_visibility<'de, D>(deserializer: D) -> Result<Option<Visibility>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => {
            let parsed = Visibility::parse(&s);
            if parsed.is_none() {
                tracing::debug!(value = %s, "unknown visibility value, treating as unset");
            }
            parsed
        }
        Some(other) => {
            tracing::debug!(value = ?other, "non-string visibility value, treating as unset");
            None
        }
        None => None,
    })
}

/// Lenient task status decoder: anything unrecognized counts as incomplete.
fn de_task_status<'de, D>(deserializer: D) -> Result<TaskStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) if s == "ready" => TaskStatus::Ready,
        Some(serde_json::Value::String(s)) if s == "incomplete" => TaskStatus::Incomplete,
        Some(other) => {
            tracing::debug!(value = ?other, "unknown task status, treating as incomplete");
            TaskStatus::Incomplete
        }
        None => TaskStatus::Incomplete,
    })
}
