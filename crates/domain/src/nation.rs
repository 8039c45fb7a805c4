use crate::capability::{Dirty, EntityKind, Nameable, Saveable};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashSet;
use townscape_common::{NationId, TownId};
use uuid::Uuid;

/// A named alliance aggregating zero or more towns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nation {
    id: NationId,
    name: String,
    towns: HashSet<TownId>,
    #[serde(skip)]
    dirty: bool,
}

impl Nation {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(NationId::new(), name)
    }

    /// Reconstruct a nation loaded by a backend.
    pub fn with_id(id: NationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            towns: HashSet::new(),
            dirty: false,
        }
    }

    pub fn id(&self) -> NationId {
        self.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.dirty = true;
    }

    pub fn towns(&self) -> &HashSet<TownId> {
        &self.towns
    }

    pub fn has_town(&self, town: TownId) -> bool {
        self.towns.contains(&town)
    }

    /// Admit a town. Returns false if it was already a member.
    pub fn add_town(&mut self, town: TownId) -> bool {
        let added = self.towns.insert(town);
        if added {
            self.dirty = true;
        }
        added
    }

    /// Expel a town. Returns false if it was not a member.
    pub fn remove_town(&mut self, town: TownId) -> bool {
        let removed = self.towns.remove(&town);
        if removed {
            self.dirty = true;
        }
        removed
    }
}

impl Nameable for Nation {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Dirty for Nation {
    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

impl Saveable for Nation {
    fn uuid(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Nation
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
