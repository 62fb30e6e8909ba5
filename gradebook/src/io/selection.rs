//! Last-viewed semester, kept under its own key outside the document.

use anyhow::Result;
use tracing::debug;

use crate::io::storage::{SELECTED_SEMESTER_KEY, Storage};
use crate::record::Document;

/// Used when nothing valid is stored and the document has no semesters.
pub const FALLBACK_SEMESTER: &str = "1-1";

/// Resolve the semester to show: the stored id if it still exists, otherwise
/// the first semester of `document`.
pub fn resolve_selected<S: Storage>(storage: &S, document: &Document) -> String {
    let stored = match storage.get(SELECTED_SEMESTER_KEY) {
        Ok(stored) => stored,
        Err(err) => {
            debug!(error = %format!("{err:#}"), "ignoring unreadable selection");
            None
        }
    };
    match stored.map(|id| id.trim().to_string()) {
        Some(id) if document.semester(&id).is_some() => id,
        _ => document
            .semesters
            .first()
            .map_or_else(|| FALLBACK_SEMESTER.to_string(), |sem| sem.id.clone()),
    }
}

pub fn write_selected<S: Storage>(storage: &mut S, semester_id: &str) -> Result<()> {
    storage.set(SELECTED_SEMESTER_KEY, semester_id)
}
