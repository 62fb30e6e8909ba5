//! Deterministic, pure logic over academic records.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! documents and return deterministic outputs suitable for tests.

pub mod aggregate;
pub mod entry;
pub mod grading;
pub mod invariants;
pub mod summary;
