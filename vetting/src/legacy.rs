//! Decoder for the retired admin console's notes column.
//!
//! The old console stored reviewer notes and the verification checklist
//! in one `admin_notes` text column, smuggling the structured part in as
//! a `__metadata` JSON record next to the free text. This module exists
//! so imports can split those blobs into the typed fields; it is total
//! and never fails, because a migration that dies on row 40,312 helps
//! nobody. Unparseable pieces are skipped with a warning. New writes go
//! through [`crate::review::ReviewState`] and never produce blobs.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::types::{ChecklistItem, ReviewNote, VerificationChecklist};

/// Author recorded on notes whose writer the old console did not keep.
pub const LEGACY_AUTHOR: &str = "legacy";

const METADATA_KEY: &str = "__metadata";

/// Structured review data recovered from one legacy blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyReview {
    pub notes: Vec<ReviewNote>,
    pub checklist: VerificationChecklist,
}

/// Decode one `admin_notes` column value.
///
/// Accepts the historical shapes:
/// - a JSON object with a `notes` array and a `__metadata` record,
/// - a JSON array of notes with a `__metadata` entry mixed in,
/// - bare free text from before the blob convention.
///
/// Anything else decodes to whatever could be recovered, down to an
/// empty result.
pub fn decode_legacy_notes(raw: &str) -> LegacyReview {
    let mut review = LegacyReview::default();

    if raw.trim().is_empty() {
        return review;
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => {
            if let Some(meta) = map.get(METADATA_KEY) {
                apply_metadata(meta, &mut review.checklist);
            }
            let has_metadata = map.contains_key(METADATA_KEY);
            match map.get("notes") {
                Some(Value::Array(items)) => {
                    for item in items {
                        push_note_value(item, &mut review);
                    }
                }
                Some(other) => {
                    warn!(value = ?other, "legacy notes field is not an array, skipping");
                }
                // A lone note object was also a shape in the wild.
                None if !has_metadata => {
                    push_note_value(&Value::Object(map), &mut review);
                }
                None => {}
            }
        }
        Ok(Value::Array(items)) => {
            for item in &items {
                push_note_value(item, &mut review);
            }
        }
        Ok(Value::String(text)) => push_text_note(&text, &mut review),
        Ok(other) => {
            warn!(value = ?other, "unrecognized legacy notes shape, skipping");
        }
        // Not JSON at all: the column predates the blob convention and
        // holds one free-text note.
        Err(_) => push_text_note(raw, &mut review),
    }

    review
}

fn push_note_value(value: &Value, review: &mut LegacyReview) {
    match value {
        Value::String(text) => push_text_note(text, review),
        Value::Object(map) => {
            if let Some(meta) = map.get(METADATA_KEY) {
                apply_metadata(meta, &mut review.checklist);
                return;
            }

            let body = map
                .get("body")
                .or_else(|| map.get("text"))
                .or_else(|| map.get("note"))
                .and_then(|v| v.as_str());
            let body = match body {
                Some(body) if !body.trim().is_empty() => body,
                Some(_) => return,
                None => {
                    warn!("legacy note entry has no text field, skipping");
                    return;
                }
            };

            let author = map
                .get("author")
                .and_then(|v| v.as_str())
                .unwrap_or(LEGACY_AUTHOR);

            let mut note = ReviewNote::new(author, body);
            if let Some(at) = map
                .get("created_at")
                .and_then(|v| v.as_str())
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            {
                note.created_at = at.with_timezone(&Utc);
            }
            review.notes.push(note);
        }
        other => {
            warn!(value = ?other, "unrecognized legacy note entry, skipping");
        }
    }
}

fn push_text_note(text: &str, review: &mut LegacyReview) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    review.notes.push(ReviewNote::new(LEGACY_AUTHOR, text));
}

fn apply_metadata(meta: &Value, checklist: &mut VerificationChecklist) {
    let map = match meta.as_object() {
        Some(map) => map,
        None => {
            warn!(value = ?meta, "legacy __metadata is not an object, skipping");
            return;
        }
    };

    // Either { "checklist": { ... } } or the booleans at the top level;
    // both shapes occur in old rows.
    let source = map
        .get("checklist")
        .and_then(|v| v.as_object())
        .unwrap_or(map);

    for item in ChecklistItem::ALL {
        if let Some(verified) = source.get(item.as_str()).and_then(|v| v.as_bool()) {
            checklist.set(item, verified);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_object_shape_splits_notes_and_checklist() {
        let raw = r#"{
            "notes": [
                "First pass looks fine",
                {
                    "author": "rev-9",
                    "body": "Called the school, confirmed employment",
                    "created_at": "2021-07-14T10:30:00Z"
                }
            ],
            "__metadata": {
                "checklist": { "identity": true, "institution": true }
            }
        }"#;

        let review = decode_legacy_notes(raw);
        assert_eq!(review.notes.len(), 2);
        assert_eq!(review.notes[0].author, LEGACY_AUTHOR);
        assert_eq!(review.notes[1].author, "rev-9");
        assert_eq!(
            review.notes[1].created_at,
            Utc.with_ymd_and_hms(2021, 7, 14, 10, 30, 0).unwrap()
        );

        assert!(review.checklist.identity);
        assert!(review.checklist.institution);
        assert!(!review.checklist.credentials);
        assert!(!review.checklist.conduct_policy);
    }

    #[test]
    fn test_array_shape_with_embedded_metadata() {
        let raw = r#"[
            "Note one",
            { "__metadata": { "identity": true, "conduct_policy": true } },
            { "text": "Note two" }
        ]"#;

        let review = decode_legacy_notes(raw);
        assert_eq!(review.notes.len(), 2);
        assert_eq!(review.notes[0].body, "Note one");
        assert_eq!(review.notes[1].body, "Note two");
        assert!(review.checklist.identity);
        assert!(review.checklist.conduct_policy);
    }

    #[test]
    fn test_bare_text_becomes_one_note() {
        let review = decode_legacy_notes("called them, got voicemail, try thursday");
        assert_eq!(review.notes.len(), 1);
        assert_eq!(review.notes[0].author, LEGACY_AUTHOR);
        assert_eq!(review.notes[0].body, "called them, got voicemail, try thursday");
        assert_eq!(review.checklist, VerificationChecklist::default());
    }

    #[test]
    fn test_garbage_never_fails() {
        assert_eq!(decode_legacy_notes(""), LegacyReview::default());
        assert_eq!(decode_legacy_notes("   \n  "), LegacyReview::default());
        assert_eq!(decode_legacy_notes("42"), LegacyReview::default());
        assert_eq!(decode_legacy_notes("true"), LegacyReview::default());

        // Broken JSON is treated as free text.
        let review = decode_legacy_notes("{oops, not json");
        assert_eq!(review.notes.len(), 1);

        // Wrong-typed fields are skipped, not fatal.
        let review = decode_legacy_notes(r#"{ "notes": "not-an-array", "__metadata": 7 }"#);
        assert!(review.notes.is_empty());
        assert_eq!(review.checklist, VerificationChecklist::default());
    }

    #[test]
    fn test_unknown_checklist_keys_ignored() {
        let raw = r#"{ "notes": [], "__metadata": { "checklist": { "identity": true, "zodiac_sign": true } } }"#;
        let review = decode_legacy_notes(raw);
        assert!(review.checklist.identity);
        assert!(!review.checklist.institution);
    }

    #[test]
    fn test_blank_entries_dropped() {
        let raw = r#"[ "", "   ", { "body": "" }, { "author": "rev-1" }, "kept" ]"#;
        let review = decode_legacy_notes(raw);
        assert_eq!(review.notes.len(), 1);
        assert_eq!(review.notes[0].body, "kept");
    }

    #[test]
    fn test_lone_note_object_shape() {
        let raw = r#"{ "author": "rev-3", "body": "Single note row" }"#;
        let review = decode_legacy_notes(raw);
        assert_eq!(review.notes.len(), 1);
        assert_eq!(review.notes[0].author, "rev-3");
    }
}
