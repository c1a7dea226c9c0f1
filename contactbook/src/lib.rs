//! Contact book: a small persisted list of contacts behind a form-style
//! interaction model.
//!
//! - **[`core`]**: Pure logic. The ordered [`core::book::ContactBook`], form
//!   validation, and the [`core::session`] reducer that turns user actions
//!   into state changes and effects. No I/O.
//! - **[`io`]**: Configuration, the two file codecs, and backing-file
//!   load/save.
//!
//! [`dispatch`] ties the two together: it runs the reducer and performs the
//! effects it asks for. The CLI and the web UI are both thin callers of it.

pub mod contact;
pub mod core;
pub mod dispatch;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
