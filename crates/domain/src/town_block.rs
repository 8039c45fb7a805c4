use crate::capability::{EntityKind, Saveable};
use serde::{Deserialize, Serialize};
use std::any::Any;
use townscape_common::{TownBlockId, TownBlockPos, TownId, WorldId};
use uuid::Uuid;

/// A fixed-size spatial cell, keyed by coordinates plus owning world and
/// held by at most one town at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TownBlock {
    id: TownBlockId,
    pos: TownBlockPos,
    town: Option<TownId>,
}

impl TownBlock {
    pub fn new(pos: TownBlockPos) -> Self {
        Self::with_id(TownBlockId::new(), pos)
    }

    /// Reconstruct a town block loaded by a backend.
    pub fn with_id(id: TownBlockId, pos: TownBlockPos) -> Self {
        Self {
            id,
            pos,
            town: None,
        }
    }

    pub fn id(&self) -> TownBlockId {
        self.id
    }

    pub fn pos(&self) -> TownBlockPos {
        self.pos
    }

    pub fn world(&self) -> WorldId {
        self.pos.world
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn z(&self) -> i32 {
        self.pos.z
    }

    pub fn town(&self) -> Option<TownId> {
        self.town
    }

    pub fn set_town(&mut self, town: Option<TownId>) {
        self.town = town;
    }
}

impl Saveable for TownBlock {
    fn uuid(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn kind(&self) -> EntityKind {
        EntityKind::TownBlock
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
