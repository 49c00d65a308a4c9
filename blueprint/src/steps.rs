//! The builder wizard's step dependency graph.
//!
//! Nine fixed steps form a linear chain with one conditional edge: the
//! certification step drops out of the chain entirely when certificates are
//! disabled, in which case visibility depends directly on branding.
//!
//! Matches TypeScript `BuilderStep` in simulation-builder.model.ts.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// One named stage of the simulation builder wizard, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Program title, descriptions, industry, role, type
    Metadata,
    /// Learning outcomes and skills
    Outcomes,
    /// The work tasks students perform
    Tasks,
    /// Duration, difficulty, audience, grading criteria
    Assessment,
    /// Company logo, banner, and employer copy
    Branding,
    /// Certificate settings; skipped when certificates are disabled
    Certification,
    /// Who can see the program
    Visibility,
    /// Analytics overview; viewing it is the completion criterion
    Analytics,
    /// Final manual review and publish; never auto-completed
    Review,
}

/// Completion chain with the certification step present.
const CHAIN_WITH_CERT: [Step; 8] = [
    Step::Metadata,
    Step::Outcomes,
    Step::Tasks,
    Step::Assessment,
    Step::Branding,
    Step::Certification,
    Step::Visibility,
    Step::Analytics,
];

/// Completion chain with certificates disabled.
const CHAIN_WITHOUT_CERT: [Step; 7] = [
    Step::Metadata,
    Step::Outcomes,
    Step::Tasks,
    Step::Assessment,
    Step::Branding,
    Step::Visibility,
    Step::Analytics,
];

impl Step {
    /// All steps in wizard order, including the terminal review step.
    pub const ALL: [Step; 9] = [
        Step::Metadata,
        Step::Outcomes,
        Step::Tasks,
        Step::Assessment,
        Step::Branding,
        Step::Certification,
        Step::Visibility,
        Step::Analytics,
        Step::Review,
    ];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Outcomes => "outcomes",
            Self::Tasks => "tasks",
            Self::Assessment => "assessment",
            Self::Branding => "branding",
            Self::Certification => "certification",
            Self::Visibility => "visibility",
            Self::Analytics => "analytics",
            Self::Review => "review",
        }
    }

    /// The step that must be complete before this one can be.
    ///
    /// `Metadata` has no predecessor. `Visibility` follows `Certification`
    /// when certificates are enabled and `Branding` otherwise; on the
    /// disabled branch `Certification` is not part of the chain at all.
    pub fn predecessor(self, certificate_enabled: bool) -> Option<Step> {
        match self {
            Self::Metadata => None,
            Self::Outcomes => Some(Self::Metadata),
            Self::Tasks => Some(Self::Outcomes),
            Self::Assessment => Some(Self::Tasks),
            Self::Branding => Some(Self::Assessment),
            Self::Certification => Some(Self::Branding),
            Self::Visibility => {
                if certificate_enabled {
                    Some(Self::Certification)
                } else {
                    Some(Self::Branding)
                }
            }
            Self::Analytics => Some(Self::Visibility),
            Self::Review => Some(Self::Analytics),
        }
    }

    /// The ordered steps that participate in completion tracking.
    ///
    /// Review is excluded (it has no completeness predicate), and
    /// certification is excluded when certificates are disabled.
    pub fn completion_chain(certificate_enabled: bool) -> &'static [Step] {
        if certificate_enabled {
            &CHAIN_WITH_CERT
        } else {
            &CHAIN_WITHOUT_CERT
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
