//! The live entity graph: residents, towns, nations, worlds, town blocks.
//!
//! Entities are created and mutated by domain logic; the persistence layer
//! only observes them through the capabilities in [`capability`].
//!
//! # Invariants
//! - All mutation flows through explicit operations, which mark the entity
//!   dirty when it tracks dirty state.
//! - A loaded or freshly created entity starts clean.

pub mod capability;
pub mod nation;
pub mod regen;
pub mod registry;
pub mod resident;
pub mod town;
pub mod town_block;
pub mod world;

pub use capability::{Dirty, EntityKind, Nameable, Saveable, TownBlockHolder};
pub use nation::Nation;
pub use regen::{PlotSnapshot, RegenData, RegenQueue};
pub use registry::Registry;
pub use resident::Resident;
pub use town::Town;
pub use town_block::TownBlock;
pub use world::TownWorld;
