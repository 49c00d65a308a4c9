//! Student library catalog: filtering and client-side pagination.
//!
//! The library view filters the full published catalog in memory and pages
//! the result; both halves live here so the frontend and any admin tooling
//! agree on the semantics.

use serde::{Deserialize, Serialize};

use crate::types::{Simulation, Visibility};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Catalog search criteria. All fields optional; an unset field matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CatalogFilter {
    /// Case-insensitive substring over title, short description, industry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<String>,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn with_program_type(mut self, program_type: impl Into<String>) -> Self {
        self.program_type = Some(program_type.into());
        self
    }

    /// Whether a record satisfies every set criterion.
    pub fn matches(&self, sim: &Simulation) -> bool {
        if let Some(needle) = self.search.as_deref() {
            let needle = needle.trim().to_lowercase();
            if !needle.is_empty() {
                let hit = [
                    sim.title.as_deref(),
                    sim.short_description.as_deref(),
                    sim.industry.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|hay| hay.to_lowercase().contains(&needle));
                if !hit {
                    return false;
                }
            }
        }

        field_matches(self.industry.as_deref(), sim.industry.as_deref())
            && field_matches(self.difficulty.as_deref(), sim.difficulty_level.as_deref())
            && field_matches(self.program_type.as_deref(), sim.program_type.as_deref())
    }
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(want) => actual.is_some_and(|have| have.eq_ignore_ascii_case(want)),
    }
}

/// Filter the catalog for a student-facing listing.
///
/// Only `public` records are listable by students; enterprise-side views
/// pass `include_unlisted` to see drafts and restricted records too.
pub fn filter_catalog<'a>(
    records: &'a [Simulation],
    filter: &CatalogFilter,
    include_unlisted: bool,
) -> Vec<&'a Simulation> {
    records
        .iter()
        .filter(|sim| include_unlisted || sim.visibility == Some(Visibility::Public))
        .filter(|sim| filter.matches(sim))
        .collect()
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// Slice out one 1-based page, clamping out-of-range requests to the
/// nearest valid page. A `per_page` of zero is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: u32, per_page: u32) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len() as u64;
    let total_pages = ((total_items as f64) / (per_page as f64)).ceil() as u32;
    let page = page.max(1).min(total_pages.max(1));
    let skip = ((page - 1) * per_page) as usize;

    Page {
        items: items
            .iter()
            .skip(skip)
            .take(per_page as usize)
            .cloned()
            .collect(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}
