//! Shared types for the townscape persistence core.
//!
//! # Invariants
//! - Identifiers never change after creation and are the primary map keys
//!   everywhere an entity category is loaded in bulk.
//! - A town block position is unique within its world.

pub mod id;
pub mod pos;

pub use id::{NationId, ResidentId, TownBlockId, TownId, WorldId};
pub use pos::TownBlockPos;
