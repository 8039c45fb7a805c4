//! Pluggable persistence for the townscape entity graph.
//!
//! [`Database`] is the full boundary a storage backend implements; the
//! [`migration`] step relocates the legacy on-disk layout before any backend
//! is constructed; [`MemoryDatabase`] is the in-memory reference backend the
//! contract tests run against.
//!
//! # Invariants
//! - Migration runs exactly once, before any load.
//! - A dirty flag is cleared only by the batch save path.
//! - Load-all results are owned by the caller; the layer never retains them.

pub mod database;
pub mod memory;
pub mod migration;

pub use database::{Database, DatabaseExt};
pub use memory::MemoryDatabase;
pub use migration::{DataLayout, MigrationError, MigrationOutcome, migrate_legacy_data};
