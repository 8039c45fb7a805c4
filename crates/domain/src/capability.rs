//! Capabilities the persistence layer dispatches on.
//!
//! Dirty tracking is a capability query, not a type switch: the batch save
//! path asks each entity for its [`Dirty`] view and new entity categories
//! opt in by overriding [`Saveable::as_dirty`], with no change to the
//! persistence layer itself.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use townscape_common::TownBlockPos;
use uuid::Uuid;

/// The entity categories the persistence layer knows how to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Resident,
    Town,
    Nation,
    World,
    TownBlock,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Resident => "resident",
            EntityKind::Town => "town",
            EntityKind::Nation => "nation",
            EntityKind::World => "world",
            EntityKind::TownBlock => "town block",
        };
        f.write_str(name)
    }
}

/// The minimal capability anything persisted must expose: a stable identity
/// plus enough routing information for a backend to serialize it.
///
/// Backends own category-specific serialization and get at the concrete
/// entity through [`Saveable::as_any`].
pub trait Saveable {
    /// Stable identity, fixed at creation.
    fn uuid(&self) -> Uuid;

    /// Which category this entity belongs to.
    fn kind(&self) -> EntityKind;

    /// Concrete-type access for backend serialization.
    fn as_any(&self) -> &dyn Any;

    /// Dirty-tracking capability query. Entities that do not track dirty
    /// state return `None` and are always written.
    fn as_dirty(&self) -> Option<&dyn Dirty> {
        None
    }

    fn as_dirty_mut(&mut self) -> Option<&mut dyn Dirty> {
        None
    }
}

/// Unsaved-mutation marker.
///
/// Starts false on creation and load, set true by any mutating operation,
/// and returns to false only through the batch save path.
pub trait Dirty {
    fn is_dirty(&self) -> bool;

    fn set_dirty(&mut self, dirty: bool);
}

/// Entities addressable by a unique display name within their category.
pub trait Nameable {
    fn name(&self) -> &str;
}

/// Aggregates that own town blocks and answer membership queries.
pub trait TownBlockHolder: Nameable {
    /// The positions of every town block this holder owns.
    fn town_blocks(&self) -> &HashSet<TownBlockPos>;

    fn has_town_block(&self, pos: TownBlockPos) -> bool {
        self.town_blocks().contains(&pos)
    }
}
