//! The record store: sole owner and writer of the document.
//!
//! Every mutator applies its change in memory and then writes the whole
//! document through to [`Storage`] before returning. A failed write is
//! reported as a [`PersistWarning`] on the returned [`Mutation`]; the
//! in-memory document stays authoritative either way.

use anyhow::{Result, anyhow};
use tracing::{debug, info, warn};

use crate::io::selection::{resolve_selected, write_selected};
use crate::io::storage::{DOCUMENT_KEY, PersistWarning, SELECTED_SEMESTER_KEY, Storage};
use crate::record::{CoursePatch, Document, NewCourse, seed_document};
use crate::transfer::{self, ImportError};

/// Where the document came from at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Persisted state was read and adopted.
    Restored,
    /// Nothing was persisted; the seed document was created.
    Seeded,
    /// Persisted state was unreadable and has been replaced by the seed.
    Reseeded,
}

pub struct Initialized<S> {
    pub store: RecordStore<S>,
    pub source: LoadSource,
    /// Set when seeding could not be written through.
    pub warning: Option<PersistWarning>,
}

/// Result of a mutation: the fully applied snapshot.
#[derive(Debug)]
#[must_use]
pub struct Mutation<'a> {
    pub document: &'a Document,
    /// False when the target semester or course was not found (no-op).
    pub applied: bool,
    /// Id of the course that was added, updated, or deleted.
    pub course_id: Option<String>,
    pub warning: Option<PersistWarning>,
}

pub struct RecordStore<S> {
    storage: S,
    document: Document,
    next_id: u64,
}

impl<S: Storage> RecordStore<S> {
    /// Load persisted state, or seed and persist a fresh document.
    ///
    /// Unreadable or unparsable state is discarded and reseeded; it never
    /// surfaces as an error.
    pub fn initialize(storage: S) -> Initialized<S> {
        let (document, source) = match storage.get(DOCUMENT_KEY) {
            Ok(None) => (seed_document(), LoadSource::Seeded),
            Ok(Some(text)) => match transfer::restore(&text) {
                Ok(document) => (document, LoadSource::Restored),
                Err(err) => {
                    warn!(error = %err, "discarding unparsable stored document");
                    (seed_document(), LoadSource::Reseeded)
                }
            },
            Err(err) => {
                warn!(error = %format!("{err:#}"), "could not read stored document");
                (seed_document(), LoadSource::Reseeded)
            }
        };

        let mut store = Self {
            storage,
            next_id: next_id_after(&document),
            document,
        };
        let warning = match source {
            LoadSource::Restored => None,
            LoadSource::Seeded | LoadSource::Reseeded => store.persist(),
        };
        info!(
            ?source,
            semesters = store.document.semesters.len(),
            courses = store.document.course_count(),
            "record store initialized"
        );
        Initialized {
            store,
            source,
            warning,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Append a course with a freshly minted id. No-op for unknown semesters.
    pub fn add_course(&mut self, semester_id: &str, course: NewCourse) -> Mutation<'_> {
        let candidate = self.next_id;
        let Some(semester) = self.document.semester_mut(semester_id) else {
            debug!(semester_id, "add_course: unknown semester");
            return self.unchanged();
        };

        let mut n = candidate;
        let mut id = format!("{semester_id}-{n}");
        while semester.course(&id).is_some() {
            n = bump(n);
            id = format!("{semester_id}-{n}");
        }
        semester.courses.push(course.into_course(id.clone()));
        self.next_id = bump(n);

        debug!(semester_id, course_id = %id, "course added");
        self.applied(id)
    }

    /// Merge `patch` into the matching course. No-op when not found.
    pub fn update_course(
        &mut self,
        semester_id: &str,
        course_id: &str,
        patch: &CoursePatch,
    ) -> Mutation<'_> {
        let course = self
            .document
            .semester_mut(semester_id)
            .and_then(|sem| sem.courses.iter_mut().find(|course| course.id == course_id));
        let Some(course) = course else {
            debug!(semester_id, course_id, "update_course: not found");
            return self.unchanged();
        };

        patch.apply_to(course);
        debug!(semester_id, course_id, "course updated");
        self.applied(course_id.to_string())
    }

    /// Remove the matching course. No-op when not found.
    pub fn delete_course(&mut self, semester_id: &str, course_id: &str) -> Mutation<'_> {
        let Some(semester) = self.document.semester_mut(semester_id) else {
            debug!(semester_id, course_id, "delete_course: unknown semester");
            return self.unchanged();
        };
        let before = semester.courses.len();
        semester.courses.retain(|course| course.id != course_id);
        if semester.courses.len() == before {
            debug!(semester_id, course_id, "delete_course: not found");
            return self.unchanged();
        }

        debug!(semester_id, course_id, "course deleted");
        self.applied(course_id.to_string())
    }

    /// Replace the whole document with an imported one.
    ///
    /// On error the current document is left untouched and nothing is written.
    pub fn import(&mut self, text: &str) -> Result<Mutation<'_>, ImportError> {
        let document = transfer::import(text)?;
        self.next_id = self.next_id.max(next_id_after(&document));
        self.document = document;
        info!(
            semesters = self.document.semesters.len(),
            courses = self.document.course_count(),
            "document imported"
        );
        let warning = self.persist();
        Ok(Mutation {
            document: &self.document,
            applied: true,
            course_id: None,
            warning,
        })
    }

    pub fn export(&self) -> Result<String> {
        transfer::export(&self.document)
    }

    /// Last-viewed semester, falling back to the first one.
    pub fn selected_semester(&self) -> String {
        resolve_selected(&self.storage, &self.document)
    }

    /// Remember `semester_id` as the last-viewed semester.
    pub fn select_semester(&mut self, semester_id: &str) -> Result<Option<PersistWarning>> {
        if self.document.semester(semester_id).is_none() {
            return Err(anyhow!("unknown semester '{semester_id}'"));
        }
        let warning = write_selected(&mut self.storage, semester_id)
            .err()
            .map(|err| PersistWarning::new(SELECTED_SEMESTER_KEY, &err));
        if let Some(warning) = &warning {
            warn!(%warning, "selection not persisted");
        }
        Ok(warning)
    }

    fn unchanged(&self) -> Mutation<'_> {
        Mutation {
            document: &self.document,
            applied: false,
            course_id: None,
            warning: None,
        }
    }

    fn applied(&mut self, course_id: String) -> Mutation<'_> {
        let warning = self.persist();
        Mutation {
            document: &self.document,
            applied: true,
            course_id: Some(course_id),
            warning,
        }
    }

    fn persist(&mut self) -> Option<PersistWarning> {
        let result = transfer::export(&self.document)
            .and_then(|text| self.storage.set(DOCUMENT_KEY, &text));
        match result {
            Ok(()) => None,
            Err(err) => {
                let warning = PersistWarning::new(DOCUMENT_KEY, &err);
                warn!(%warning, "write-through failed; keeping in-memory document");
                Some(warning)
            }
        }
    }
}

/// First counter value above every numeric id suffix in `document`.
fn next_id_after(document: &Document) -> u64 {
    document
        .semesters
        .iter()
        .flat_map(|sem| sem.courses.iter())
        .filter_map(|course| course.id.rsplit('-').next()?.parse::<u64>().ok())
        .max()
        .map_or(1, bump)
}

/// Next counter value; wraps to 1 past `u64::MAX` and relies on the collision scan.
fn bump(n: u64) -> u64 {
    n.checked_add(1).unwrap_or(1)
}
