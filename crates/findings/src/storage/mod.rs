//! Storage backend implementations.
//!
//! Concrete implementations of the repository trait defined in
//! `findings_core::storage`. SQLite is the only backend.

pub mod sqlite;

pub use sqlite::SqliteRepository;
