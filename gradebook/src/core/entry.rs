//! Helpers for turning free-form user input into course data.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::grading::is_sentinel;
use crate::core::summary::Category;
use crate::record::{CoursePatch, NewCourse};

pub const DEFAULT_CREDITS: u32 = 4;
pub const DEFAULT_GRADE: &str = "A";
pub const DEFAULT_CATEGORY: Category = Category::Cdc;

static CODE_AND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*-\s*(.*)$").unwrap());

/// Split `"CODE - Name"` into `(code, name)`.
///
/// Without a dash, the first word becomes the code and the whole text the name.
/// Returns `None` when either part ends up empty.
pub fn parse_course_input(input: &str) -> Option<(String, String)> {
    let input = input.trim();
    let (code, name) = match CODE_AND_NAME.captures(input) {
        Some(caps) => (caps[1].trim().to_string(), caps[2].trim().to_string()),
        None => (
            input.split_whitespace().next().unwrap_or_default().to_string(),
            input.to_string(),
        ),
    };
    if code.is_empty() || name.is_empty() {
        return None;
    }
    Some((code, name))
}

/// Build a new course from entry text, applying the entry defaults.
pub fn new_course(
    input: &str,
    credits: Option<u32>,
    grade: Option<&str>,
    kind: Option<&str>,
) -> Option<NewCourse> {
    let (code, name) = parse_course_input(input)?;
    Some(NewCourse {
        code,
        name,
        credits: credits.unwrap_or(DEFAULT_CREDITS),
        grade: grade.unwrap_or(DEFAULT_GRADE).to_string(),
        kind: Some(kind.unwrap_or(DEFAULT_CATEGORY.tag()).to_string()),
    })
}

/// Force zero credits when an edit sets a `GD`/`CLR` grade.
pub fn normalize_patch(mut patch: CoursePatch) -> CoursePatch {
    if patch.grade.as_deref().is_some_and(is_sentinel) {
        patch.credits = Some(0);
    }
    patch
}
