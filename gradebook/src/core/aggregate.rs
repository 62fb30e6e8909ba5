//! Grade-point averages over a document snapshot.
//!
//! All sums are accumulated as integers and divided once, so results do not
//! depend on course order. Courses tagged `GD`/`CLR` never contribute grade
//! points toward a term or the cumulative GPA. Their credits still count toward
//! a term's denominator but are left out of the cumulative one. The running
//! column of [`semester_table`] applies neither rule and counts them in full.

use serde::Serialize;

use crate::core::grading::{grade_points, is_sentinel};
use crate::record::{Course, Document, Semester};

/// Per-semester line of the running breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterRow {
    pub id: String,
    pub name: String,
    pub sgpa: f64,
    /// Running GPA over this semester and every earlier one, sentinel-tagged
    /// courses included. Differs from [`cumulative_gpa`] when any are present.
    pub cgpa_to_date: f64,
}

/// One point of the SGPA trend (semesters with at least one course).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub id: String,
    pub name: String,
    pub sgpa: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    weighted_points: u64,
    credits: u64,
}

impl Totals {
    fn average(self) -> f64 {
        if self.credits == 0 {
            return 0.0;
        }
        self.weighted_points as f64 / self.credits as f64
    }

    fn add_all(&mut self, courses: &[Course]) {
        for course in courses {
            self.weighted_points += weighted_points(course);
            self.credits += u64::from(course.credits);
        }
    }

    fn add_cumulative(&mut self, courses: &[Course]) {
        for course in courses {
            if is_excluded(course) {
                continue;
            }
            self.weighted_points += weighted_points(course);
            self.credits += u64::from(course.credits);
        }
    }
}

/// True for courses whose `type` is one of the `GD`/`CLR` sentinels.
pub fn is_excluded(course: &Course) -> bool {
    course.kind.as_deref().is_some_and(is_sentinel)
}

fn weighted_points(course: &Course) -> u64 {
    u64::from(grade_points(&course.grade)) * u64::from(course.credits)
}

/// Term GPA (SGPA). Sentinel-tagged courses add credits but no grade points.
pub fn term_gpa(semester: &Semester) -> f64 {
    let totals = semester
        .courses
        .iter()
        .fold(Totals::default(), |mut acc, course| {
            if !is_excluded(course) {
                acc.weighted_points += weighted_points(course);
            }
            acc.credits += u64::from(course.credits);
            acc
        });
    totals.average()
}

/// Cumulative GPA (CGPA). Sentinel-tagged courses are skipped entirely.
pub fn cumulative_gpa(document: &Document) -> f64 {
    let mut totals = Totals::default();
    for semester in &document.semesters {
        totals.add_cumulative(&semester.courses);
    }
    totals.average()
}

/// Credit load of a semester, sentinel-tagged courses included.
pub fn semester_credits(semester: &Semester) -> u64 {
    semester
        .courses
        .iter()
        .map(|course| u64::from(course.credits))
        .sum()
}

pub fn total_credits(document: &Document) -> u64 {
    document.semesters.iter().map(semester_credits).sum()
}

/// SGPA and running CGPA for every semester in document order.
///
/// The running figure weighs every course by its grade points, `GD`/`CLR`
/// tags included; `check` reports documents where this diverges.
pub fn semester_table(document: &Document) -> Vec<SemesterRow> {
    let mut running = Totals::default();
    document
        .semesters
        .iter()
        .map(|semester| {
            running.add_all(&semester.courses);
            SemesterRow {
                id: semester.id.clone(),
                name: semester.name.clone(),
                sgpa: term_gpa(semester),
                cgpa_to_date: running.average(),
            }
        })
        .collect()
}

pub fn trend(document: &Document) -> Vec<TrendPoint> {
    document
        .semesters
        .iter()
        .filter(|semester| !semester.courses.is_empty())
        .map(|semester| TrendPoint {
            id: semester.id.clone(),
            name: semester.name.clone(),
            sgpa: term_gpa(semester),
        })
        .collect()
}
