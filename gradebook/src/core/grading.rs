//! Letter grade to grade-point mapping.

/// Selectable letter grades with their grade points, best first.
pub const GRADE_TABLE: [(&str, u32); 9] = [
    ("A", 10),
    ("A-", 9),
    ("B", 8),
    ("B-", 7),
    ("C", 6),
    ("C-", 5),
    ("D", 4),
    ("E", 2),
    ("NC", 0),
];

/// Grade-deferred and credit-cleared markers.
pub const SENTINELS: [&str; 2] = ["GD", "CLR"];

/// Grade points for `grade`; unrecognized grades map to 0.
pub fn grade_points(grade: &str) -> u32 {
    GRADE_TABLE
        .iter()
        .find(|(letter, _)| *letter == grade)
        .map_or(0, |(_, points)| *points)
}

pub fn is_known_grade(grade: &str) -> bool {
    GRADE_TABLE.iter().any(|(letter, _)| *letter == grade)
}

pub fn is_sentinel(tag: &str) -> bool {
    SENTINELS.contains(&tag)
}
