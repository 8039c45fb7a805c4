use crate::capability::{EntityKind, Nameable, Saveable};
use serde::{Deserialize, Serialize};
use std::any::Any;
use townscape_common::WorldId;
use uuid::Uuid;

/// A spatial namespace containing town blocks.
///
/// Worlds do not expose the dirty capability: they mutate rarely and are
/// small, so the batch save path falls back to writing them every time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TownWorld {
    id: WorldId,
    name: String,
}

impl TownWorld {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(WorldId::new(), name)
    }

    /// Reconstruct a world loaded by a backend.
    pub fn with_id(id: WorldId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl Nameable for TownWorld {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Saveable for TownWorld {
    fn uuid(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn kind(&self) -> EntityKind {
        EntityKind::World
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worlds_do_not_track_dirty_state() {
        let world = TownWorld::new("overworld");
        assert!(world.as_dirty().is_none());
    }
}
