//! Document invariants that the JSON Schema cannot express.

use std::collections::HashSet;

use crate::core::grading::{is_known_grade, is_sentinel};
use crate::record::Document;

/// Check structural invariants:
/// - No duplicate semester ids
/// - No duplicate course ids within a semester
pub fn validate_invariants(document: &Document) -> Vec<String> {
    let mut errors = Vec::new();
    let mut semester_ids = HashSet::new();
    for semester in &document.semesters {
        if !semester_ids.insert(semester.id.as_str()) {
            errors.push(format!("duplicate semester id '{}'", semester.id));
        }
        let mut course_ids = HashSet::new();
        for course in &semester.courses {
            if !course_ids.insert(course.id.as_str()) {
                errors.push(format!(
                    "{}: duplicate course id '{}'",
                    semester.id, course.id
                ));
            }
        }
    }
    errors
}

/// Non-fatal findings about grades the aggregator will score as zero.
///
/// A `GD`/`CLR` *grade* is reported separately: only the course `type` field
/// excludes a course from GPA math, so such a course still weighs in with
/// zero grade points. A course tagged `GD`/`CLR` with credits is reported
/// too: the running table column counts it while the cumulative GPA does not.
pub fn sentinel_diagnostics(document: &Document) -> Vec<String> {
    let mut findings = Vec::new();
    for semester in &document.semesters {
        for course in &semester.courses {
            let path = format!("{}/{}", semester.id, course.id);
            let credited_sentinel = course
                .kind
                .as_deref()
                .filter(|kind| course.credits > 0 && is_sentinel(kind));
            if let Some(kind) = credited_sentinel {
                findings.push(format!(
                    "{path}: type '{kind}' counts in the table's running CGPA but not in cumulative GPA"
                ));
            }
            if is_sentinel(&course.grade) {
                let tagged = course.kind.as_deref().is_some_and(is_sentinel);
                if !tagged {
                    findings.push(format!(
                        "{path}: grade '{}' is not excluded from GPA (type is {})",
                        course.grade,
                        course.kind.as_deref().unwrap_or("unset")
                    ));
                }
            } else if !is_known_grade(&course.grade) {
                findings.push(format!(
                    "{path}: unrecognized grade '{}' counts as 0 points",
                    course.grade
                ));
            }
        }
    }
    findings
}
