//! Schedule storage for OneOnOne
//!
//! This crate provides a storage abstraction for users, contacts, events and
//! timeblocks. It ships an in-memory store (for tests and throwaway servers)
//! and a SQLite store that enforces the same constraints and cascades in the
//! schema.

#[cfg(test)]
mod conformance;
mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::SqliteScheduleStore;
pub use traits::*;
