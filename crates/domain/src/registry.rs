use crate::capability::Nameable;
use crate::{Nation, Resident, Town, TownBlock, TownWorld};
use std::collections::HashMap;
use townscape_common::{NationId, ResidentId, TownBlockId, TownBlockPos, TownId, WorldId};

/// The live entity graph, assembled from the per-category load-all calls at
/// startup and mutated by domain logic afterwards.
///
/// The persistence layer never retains or mutates these maps after handing
/// them over; iteration order carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub residents: HashMap<ResidentId, Resident>,
    pub towns: HashMap<TownId, Town>,
    pub nations: HashMap<NationId, Nation>,
    pub worlds: HashMap<WorldId, TownWorld>,
    pub town_blocks: HashMap<TownBlockId, TownBlock>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entity count across all categories.
    pub fn entity_count(&self) -> usize {
        self.residents.len()
            + self.towns.len()
            + self.nations.len()
            + self.worlds.len()
            + self.town_blocks.len()
    }

    pub fn resident_by_name(&self, name: &str) -> Option<&Resident> {
        self.residents.values().find(|r| r.name() == name)
    }

    pub fn town_by_name(&self, name: &str) -> Option<&Town> {
        self.towns.values().find(|t| t.name() == name)
    }

    pub fn nation_by_name(&self, name: &str) -> Option<&Nation> {
        self.nations.values().find(|n| n.name() == name)
    }

    pub fn world_by_name(&self, name: &str) -> Option<&TownWorld> {
        self.worlds.values().find(|w| w.name() == name)
    }

    /// Look up a town block by its coordinate + world key.
    pub fn town_block_at(&self, pos: TownBlockPos) -> Option<&TownBlock> {
        self.town_blocks.values().find(|b| b.pos() == pos)
    }
}
