use crate::capability::{Dirty, EntityKind, Nameable, Saveable, TownBlockHolder};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashSet;
use townscape_common::{TownBlockPos, TownId};
use uuid::Uuid;

/// A named settlement owning a set of town blocks, possibly spread across
/// several worlds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Town {
    id: TownId,
    name: String,
    town_blocks: HashSet<TownBlockPos>,
    #[serde(skip)]
    dirty: bool,
}

impl Town {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(TownId::new(), name)
    }

    /// Reconstruct a town loaded by a backend.
    pub fn with_id(id: TownId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            town_blocks: HashSet::new(),
            dirty: false,
        }
    }

    pub fn id(&self) -> TownId {
        self.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.dirty = true;
    }

    /// Claim a town block. Returns false if the town already held it.
    pub fn add_town_block(&mut self, pos: TownBlockPos) -> bool {
        let added = self.town_blocks.insert(pos);
        if added {
            self.dirty = true;
        }
        added
    }

    /// Release a town block. Returns false if the town did not hold it.
    pub fn remove_town_block(&mut self, pos: TownBlockPos) -> bool {
        let removed = self.town_blocks.remove(&pos);
        if removed {
            self.dirty = true;
        }
        removed
    }
}

impl Nameable for Town {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TownBlockHolder for Town {
    fn town_blocks(&self) -> &HashSet<TownBlockPos> {
        &self.town_blocks
    }
}

impl Dirty for Town {
    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

impl Saveable for Town {
    fn uuid(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Town
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_dirty(&self) -> Option<&dyn Dirty> {
        Some(self)
    }

    fn as_dirty_mut(&mut self) -> Option<&mut dyn Dirty> {
        Some(self)
    }
}
