//! Test-only helpers for constructing documents and storage fixtures.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::io::storage::{FileStorage, Storage};
use crate::record::{Course, Document, NewCourse, Semester};

/// Create an untagged course with deterministic name/code.
pub fn course(id: &str, credits: u32, grade: &str) -> Course {
    Course {
        id: id.to_string(),
        code: format!("{} code", id),
        name: format!("{} name", id),
        credits,
        grade: grade.to_string(),
        kind: None,
    }
}

/// Create a course carrying a `type` tag.
pub fn tagged_course(id: &str, credits: u32, grade: &str, kind: &str) -> Course {
    Course {
        kind: Some(kind.to_string()),
        ..course(id, credits, grade)
    }
}

pub fn semester(id: &str, courses: Vec<Course>) -> Semester {
    Semester {
        id: id.to_string(),
        name: id.to_string(),
        courses,
    }
}

pub fn document(semesters: Vec<Semester>) -> Document {
    Document { semesters }
}

/// Course data for `add_course`, tagged `CDC`.
pub fn new_course(grade: &str, credits: u32) -> NewCourse {
    NewCourse {
        code: format!("T{credits}"),
        name: format!("Test {grade}"),
        credits,
        grade: grade.to_string(),
        kind: Some("CDC".to_string()),
    }
}

/// Storage whose writes always fail (e.g. quota exceeded); reads see nothing.
#[derive(Debug, Default)]
pub struct FailingStorage {
    pub attempts: usize,
}

impl Storage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        self.attempts += 1;
        Err(anyhow!("quota exceeded writing '{key}'"))
    }
}

/// Temporary data directory for CLI and file-storage tests.
pub struct TestDataDir {
    temp: TempDir,
}

impl TestDataDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp.path().join(".gradebook")
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_dir())
    }
}
