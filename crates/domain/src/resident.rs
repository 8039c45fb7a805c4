use crate::capability::{Dirty, EntityKind, Nameable, Saveable};
use serde::{Deserialize, Serialize};
use std::any::Any;
use townscape_common::ResidentId;
use uuid::Uuid;

/// A participant in the simulation, identified by id and a unique display
/// name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resident {
    id: ResidentId,
    name: String,
    /// Never serialized; an entity read back from a backend starts clean.
    #[serde(skip)]
    dirty: bool,
}

impl Resident {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ResidentId::new(), name)
    }

    /// Reconstruct a resident loaded by a backend.
    pub fn with_id(id: ResidentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            dirty: false,
        }
    }

    pub fn id(&self) -> ResidentId {
        self.id
    }

    /// Rename the resident. Name uniqueness is the caller's precondition.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.dirty = true;
    }
}

impl Nameable for Resident {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Dirty for Resident {
    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

impl Saveable for Resident {
    fn uuid(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Resident
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
