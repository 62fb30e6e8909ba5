//! Academic record keeping with term and cumulative GPA.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (grade points, GPA aggregation,
//!   summaries, entry parsing, invariants). No I/O.
//! - **[`io`]**: Side-effecting storage, configuration, and selection state.
//!
//! [`store::RecordStore`] is the single writer of the [`record::Document`] and
//! writes it through to storage after every mutation; [`transfer`] handles
//! export and validated import.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod record;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod transfer;
