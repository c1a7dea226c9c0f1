//! Stable exit codes for contactbook CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to an unreadable config or contacts file, or a write error.
pub const INVALID: i32 = 1;
/// Add or Edit was rejected because a required field was empty.
pub const INPUT_ERROR: i32 = 2;
/// Edit or Delete was rejected because no row was selected.
pub const SELECTION_ERROR: i32 = 3;
