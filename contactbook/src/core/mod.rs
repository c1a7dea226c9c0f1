//! Deterministic, pure logic for the contact book.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod book;
pub mod notice;
pub mod session;
