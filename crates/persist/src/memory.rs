//! In-memory backend implementing the full storage contract.
//!
//! Reference collaborator for contract tests: it keeps a "stored" registry
//! standing in for durable records and a "live" registry the targeted
//! load-one calls refresh, counts every issued write and delete so the
//! dirty-skip behavior is observable, and can be forced to fail writes.

use crate::database::Database;
use std::collections::HashMap;
use townscape_common::{NationId, ResidentId, TownBlockId, TownBlockPos, TownId, WorldId};
use townscape_domain::{
    EntityKind, Nation, RegenData, RegenQueue, Registry, Resident, Saveable, Town, TownBlock,
    TownWorld,
};
use tracing::warn;

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    /// What the backend has durably stored.
    records: Registry,
    /// Entities refreshed in place by the load-one calls.
    live: Registry,
    /// Full snapshots taken via [`Database::backup`].
    snapshots: Vec<Registry>,
    regen_queue: RegenQueue,
    regen_data: RegenData,
    writes: usize,
    deletes: usize,
    fail_writes: bool,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // Seeding the stored side directly, as if a previous run had persisted
    // these entities.

    pub fn insert_resident(&mut self, resident: Resident) {
        self.records.residents.insert(resident.id(), resident);
    }

    pub fn insert_town(&mut self, town: Town) {
        self.records.towns.insert(town.id(), town);
    }

    pub fn insert_nation(&mut self, nation: Nation) {
        self.records.nations.insert(nation.id(), nation);
    }

    pub fn insert_world(&mut self, world: TownWorld) {
        self.records.worlds.insert(world.id(), world);
    }

    pub fn insert_town_block(&mut self, block: TownBlock) {
        self.records.town_blocks.insert(block.id(), block);
    }

    /// Write attempts issued through [`Database::save`], failed ones
    /// included.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Removal attempts issued through [`Database::delete`].
    pub fn delete_count(&self) -> usize {
        self.deletes
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Make every subsequent write report failure.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// The stored records, for test assertions.
    pub fn records(&self) -> &Registry {
        &self.records
    }

    /// The live registry the load-one calls refresh.
    pub fn live(&self) -> &Registry {
        &self.live
    }
}

impl Database for MemoryDatabase {
    fn backup(&mut self) -> bool {
        self.snapshots.push(self.records.clone());
        true
    }

    fn load_residents(&self) -> HashMap<ResidentId, Resident> {
        self.records.residents.clone()
    }

    fn load_resident(&mut self, name: &str) -> bool {
        match self.records.resident_by_name(name).cloned() {
            Some(resident) => {
                self.live.residents.insert(resident.id(), resident);
                true
            }
            None => false,
        }
    }

    fn load_towns(&self) -> HashMap<TownId, Town> {
        self.records.towns.clone()
    }

    fn load_town(&mut self, name: &str) -> bool {
        match self.records.town_by_name(name).cloned() {
            Some(town) => {
                self.live.towns.insert(town.id(), town);
                true
            }
            None => false,
        }
    }

    fn load_nations(&self) -> HashMap<NationId, Nation> {
        self.records.nations.clone()
    }

    fn load_nation(&mut self, name: &str) -> bool {
        match self.records.nation_by_name(name).cloned() {
            Some(nation) => {
                self.live.nations.insert(nation.id(), nation);
                true
            }
            None => false,
        }
    }

    fn load_worlds(&self) -> HashMap<WorldId, TownWorld> {
        self.records.worlds.clone()
    }

    fn load_world(&mut self, name: &str) -> bool {
        match self.records.world_by_name(name).cloned() {
            Some(world) => {
                self.live.worlds.insert(world.id(), world);
                true
            }
            None => false,
        }
    }

    fn load_town_blocks(&self) -> HashMap<TownBlockId, TownBlock> {
        self.records.town_blocks.clone()
    }

    fn load_town_block(&mut self, x: i32, z: i32, world: WorldId) -> bool {
        let pos = TownBlockPos::new(world, x, z);
        match self.records.town_block_at(pos).cloned() {
            Some(block) => {
                self.live.town_blocks.insert(block.id(), block);
                true
            }
            None => false,
        }
    }

    fn save(&mut self, obj: &dyn Saveable) -> bool {
        self.writes += 1;
        if self.fail_writes {
            return false;
        }

        // Explicit per-category serialization: the backend owns the mapping
        // from capability to concrete entity.
        match obj.kind() {
            EntityKind::Resident => {
                let Some(resident) = obj.as_any().downcast_ref::<Resident>() else {
                    return false;
                };
                self.insert_resident(resident.clone());
            }
            EntityKind::Town => {
                let Some(town) = obj.as_any().downcast_ref::<Town>() else {
                    return false;
                };
                self.insert_town(town.clone());
            }
            EntityKind::Nation => {
                let Some(nation) = obj.as_any().downcast_ref::<Nation>() else {
                    return false;
                };
                self.insert_nation(nation.clone());
            }
            EntityKind::World => {
                let Some(world) = obj.as_any().downcast_ref::<TownWorld>() else {
                    return false;
                };
                self.insert_world(world.clone());
            }
            EntityKind::TownBlock => {
                let Some(block) = obj.as_any().downcast_ref::<TownBlock>() else {
                    return false;
                };
                self.insert_town_block(block.clone());
            }
        }
        true
    }

    fn delete(&mut self, objs: &[&dyn Saveable]) -> bool {
        let mut all_removed = true;
        for obj in objs {
            self.deletes += 1;
            let uuid = obj.uuid();
            let removed = match obj.kind() {
                EntityKind::Resident => self
                    .records
                    .residents
                    .remove(&ResidentId::from_uuid(uuid))
                    .is_some(),
                EntityKind::Town => self.records.towns.remove(&TownId::from_uuid(uuid)).is_some(),
                EntityKind::Nation => self
                    .records
                    .nations
                    .remove(&NationId::from_uuid(uuid))
                    .is_some(),
                EntityKind::World => self
                    .records
                    .worlds
                    .remove(&WorldId::from_uuid(uuid))
                    .is_some(),
                EntityKind::TownBlock => self
                    .records
                    .town_blocks
                    .remove(&TownBlockId::from_uuid(uuid))
                    .is_some(),
            };
            if !removed {
                warn!(kind = %obj.kind(), id = %uuid, "delete target not present in backend");
                all_removed = false;
            }
        }
        all_removed
    }

    fn load_regen_queue(&self, queue: &mut RegenQueue) {
        *queue = self.regen_queue.clone();
    }

    fn save_regen_queue(&mut self, queue: &RegenQueue) {
        self.regen_queue = queue.clone();
    }

    fn load_regen_data(&self, data: &mut RegenData) {
        *data = self.regen_data.clone();
    }

    fn save_regen_data(&mut self, data: &RegenData) {
        self.regen_data = data.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use townscape_domain::{Dirty, PlotSnapshot};

    #[test]
    fn save_persists_each_category() {
        let mut db = MemoryDatabase::new();
        let resident = Resident::new("Alice");
        let town = Town::new("Riverwatch");
        let nation = Nation::new("Aurelia");
        let world = TownWorld::new("overworld");
        let block = TownBlock::new(TownBlockPos::new(world.id(), 1, 2));

        for obj in [
            &resident as &dyn Saveable,
            &town,
            &nation,
            &world,
            &block,
        ] {
            assert!(db.save(obj));
        }

        assert_eq!(db.records().entity_count(), 5);
        assert_eq!(db.write_count(), 5);
    }

    #[test]
    fn delete_is_all_or_reported() {
        let mut db = MemoryDatabase::new();
        let stored = Resident::new("Alice");
        let never_stored = Resident::new("Bob");
        db.insert_resident(stored.clone());

        // Deleting a present and an absent entity attempts both and
        // reports the aggregate failure.
        assert!(!db.delete(&[&stored as &dyn Saveable, &never_stored as &dyn Saveable]));
        assert!(db.records().residents.is_empty());
        assert_eq!(db.delete_count(), 2);

        let again = Resident::new("Carol");
        db.insert_resident(again.clone());
        assert!(db.delete(&[&again as &dyn Saveable]));
    }

    #[test]
    fn failed_write_does_not_store() {
        let mut db = MemoryDatabase::new();
        db.set_fail_writes(true);
        let resident = Resident::new("Alice");
        assert!(!db.save(&resident as &dyn Saveable));
        assert!(db.records().residents.is_empty());
        assert_eq!(db.write_count(), 1);
    }

    #[test]
    fn backup_snapshots_stored_records() {
        let mut db = MemoryDatabase::new();
        db.insert_resident(Resident::new("Alice"));
        assert!(db.backup());
        assert_eq!(db.snapshot_count(), 1);

        // Later mutations do not rewrite history.
        db.insert_resident(Resident::new("Bob"));
        assert!(db.backup());
        assert_eq!(db.snapshot_count(), 2);
    }

    #[test]
    fn load_one_refreshes_live_registry() {
        let mut db = MemoryDatabase::new();
        let mut resident = Resident::new("Alice");
        resident.set_dirty(true);
        db.insert_resident(resident.clone());

        assert!(db.load_resident("Alice"));
        let live = db.live().resident_by_name("Alice").unwrap();
        assert_eq!(live.id(), resident.id());
    }

    #[test]
    fn regen_datasets_round_trip_in_full() {
        let mut db = MemoryDatabase::new();
        let world = WorldId::new();
        let pos = TownBlockPos::new(world, 3, 4);

        let mut queue = RegenQueue::new();
        queue.push(pos);
        db.save_regen_queue(&queue);

        let mut data = RegenData::new();
        data.insert(PlotSnapshot {
            pos,
            blocks: vec!["stone".into(), "dirt".into()],
        });
        db.save_regen_data(&data);

        let mut loaded_queue = RegenQueue::new();
        db.load_regen_queue(&mut loaded_queue);
        assert_eq!(loaded_queue, queue);

        let mut loaded_data = RegenData::new();
        db.load_regen_data(&mut loaded_data);
        assert_eq!(loaded_data, data);
    }
}
