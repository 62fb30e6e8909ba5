//! Stable exit codes for gradebook CLI commands.

/// Command succeeded (persistence warnings do not change this).
pub const OK: i32 = 0;
/// Command failed: bad arguments, unknown ids, unreadable files, invalid config.
pub const INVALID: i32 = 1;
/// `gradebook import` rejected the payload; stored data is unchanged.
pub const REJECTED: i32 = 2;
/// `gradebook check` found invariant violations.
pub const VIOLATIONS: i32 = 3;
