//! Degree-level reporting: credit progress and category breakdown.

use serde::Serialize;

use crate::core::aggregate::{cumulative_gpa, total_credits};
use crate::record::Document;

/// Credits required for degree completion unless configured otherwise.
pub const DEFAULT_REQUIRED_CREDITS: u32 = 144;

/// Course categories used for the breakdown report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    /// Compulsory discipline course.
    #[serde(rename = "CDC")]
    Cdc,
    /// Open elective.
    #[serde(rename = "OpEL")]
    OpEl,
    /// Humanities elective.
    #[serde(rename = "HuEL")]
    HuEl,
    /// Discipline elective.
    #[serde(rename = "DEL")]
    Del,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Cdc, Category::OpEl, Category::HuEl, Category::Del];

    pub fn tag(self) -> &'static str {
        match self {
            Category::Cdc => "CDC",
            Category::OpEl => "OpEL",
            Category::HuEl => "HuEL",
            Category::Del => "DEL",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.tag() == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub courses: usize,
    pub credits: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeProgress {
    pub earned: u64,
    pub required: u32,
    /// Whole percent, may exceed 100.
    pub percent: u64,
    /// Fill ratio for progress bars, capped at 1.0.
    pub fraction: f64,
}

impl DegreeProgress {
    pub fn new(earned: u64, required: u32) -> Self {
        if required == 0 {
            return Self {
                earned,
                required,
                percent: 0,
                fraction: 0.0,
            };
        }
        let ratio = earned as f64 / f64::from(required);
        Self {
            earned,
            required,
            percent: (ratio * 100.0).round() as u64,
            fraction: ratio.min(1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub cgpa: f64,
    pub progress: DegreeProgress,
    pub breakdown: Vec<CategoryStats>,
}

impl Summary {
    pub fn from_document(document: &Document, required_credits: u32) -> Self {
        Self {
            cgpa: cumulative_gpa(document),
            progress: DegreeProgress::new(total_credits(document), required_credits),
            breakdown: category_breakdown(document),
        }
    }
}

/// Course count and credit sum per category; untagged courses are ignored.
pub fn category_breakdown(document: &Document) -> Vec<CategoryStats> {
    let mut stats: Vec<CategoryStats> = Category::ALL
        .into_iter()
        .map(|category| CategoryStats {
            category,
            courses: 0,
            credits: 0,
        })
        .collect();

    let courses = document.semesters.iter().flat_map(|sem| sem.courses.iter());
    for course in courses {
        let Some(category) = course.kind.as_deref().and_then(Category::from_tag) else {
            continue;
        };
        if let Some(entry) = stats.iter_mut().find(|entry| entry.category == category) {
            entry.courses += 1;
            entry.credits += u64::from(course.credits);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{course, document, semester, tagged_course};

    #[test]
    fn categories_serialize_as_their_tags() {
        for category in Category::ALL {
            let json = serde_json::to_value(category).expect("serialize");
            assert_eq!(json, category.tag());
        }
    }

    #[test]
    fn breakdown_counts_each_category() {
        let doc = document(vec![
            semester(
                "1-1",
                vec![
                    tagged_course("a", 4, "A", "CDC"),
                    tagged_course("b", 3, "B", "OpEL"),
                    course("c", 2, "A"),
                ],
            ),
            semester(
                "1-2",
                vec![
                    tagged_course("d", 4, "A", "CDC"),
                    tagged_course("e", 3, "C", "HuEL"),
                    tagged_course("f", 0, "A", "GD"),
                ],
            ),
        ]);

        let stats = category_breakdown(&doc);
        let cdc = &stats[0];
        assert_eq!(cdc.category, Category::Cdc);
        assert_eq!((cdc.courses, cdc.credits), (2, 8));
        assert_eq!((stats[1].courses, stats[1].credits), (1, 3));
        assert_eq!((stats[2].courses, stats[2].credits), (1, 3));
        assert_eq!((stats[3].courses, stats[3].credits), (0, 0));
    }

    #[test]
    fn progress_rounds_and_caps() {
        let progress = DegreeProgress::new(72, DEFAULT_REQUIRED_CREDITS);
        assert_eq!(progress.percent, 50);
        assert!((progress.fraction - 0.5).abs() < 1e-9);

        let over = DegreeProgress::new(150, DEFAULT_REQUIRED_CREDITS);
        assert_eq!(over.percent, 104);
        assert_eq!(over.fraction, 1.0);

        let none_required = DegreeProgress::new(10, 0);
        assert_eq!(none_required.percent, 0);
    }

    #[test]
    fn category_tags_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.tag()), Some(category));
        }
        assert_eq!(Category::from_tag("cdc"), None);
    }
}
