//! Side-effecting helpers: configuration and the backing file.

pub mod codec;
pub mod config;
pub mod store;
