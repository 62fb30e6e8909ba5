//! Academic record data model: documents, semesters, and courses.

use serde::{Deserialize, Serialize};

/// Term labels seeded on first run, in display order.
pub const SEED_SEMESTERS: [&str; 10] = [
    "1-1", "1-2", "2-1", "2-2", "ST-1", "3-1", "3-2", "ST-2", "4-1", "4-2",
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub grade: String,
    /// Category tag (`CDC`, `OpEL`, ...). Reporting only, except for the
    /// `GD`/`CLR` sentinels which the aggregator special-cases.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Semester {
    pub id: String,
    pub name: String,
    pub courses: Vec<Course>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub semesters: Vec<Semester>,
}

/// Course data supplied by a caller; the store mints the id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub grade: String,
    pub kind: Option<String>,
}

impl NewCourse {
    pub fn into_course(self, id: String) -> Course {
        Course {
            id,
            code: self.code,
            name: self.name,
            credits: self.credits,
            grade: self.grade,
            kind: self.kind,
        }
    }
}

/// Partial field replacement for an existing course.
///
/// `None` leaves a field untouched. `kind` is doubly optional so a patch can
/// clear the tag (`Some(None)`) as well as replace it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoursePatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credits: Option<u32>,
    pub grade: Option<String>,
    pub kind: Option<Option<String>>,
}

impl CoursePatch {
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.credits.is_none()
            && self.grade.is_none()
            && self.kind.is_none()
    }

    pub fn apply_to(&self, course: &mut Course) {
        if let Some(code) = &self.code {
            course.code.clone_from(code);
        }
        if let Some(name) = &self.name {
            course.name.clone_from(name);
        }
        if let Some(credits) = self.credits {
            course.credits = credits;
        }
        if let Some(grade) = &self.grade {
            course.grade.clone_from(grade);
        }
        if let Some(kind) = &self.kind {
            course.kind.clone_from(kind);
        }
    }
}

impl Semester {
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            courses: Vec::new(),
        }
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == course_id)
    }
}

impl Document {
    pub fn semester(&self, semester_id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|sem| sem.id == semester_id)
    }

    pub(crate) fn semester_mut(&mut self, semester_id: &str) -> Option<&mut Semester> {
        self.semesters.iter_mut().find(|sem| sem.id == semester_id)
    }

    pub fn course(&self, semester_id: &str, course_id: &str) -> Option<&Course> {
        self.semester(semester_id)?.course(course_id)
    }

    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|sem| sem.courses.len()).sum()
    }
}

pub fn seed_document() -> Document {
    Document {
        semesters: SEED_SEMESTERS.iter().map(|id| Semester::empty(id)).collect(),
    }
}
