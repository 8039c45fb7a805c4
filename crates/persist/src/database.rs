//! The storage contract every backend implements.
//!
//! Backends are selected by the host at startup and used behind
//! `Box<dyn Database>`; the dirty-aware batch save is provided here so every
//! backend shares the same skip-clean behavior.

use std::collections::HashMap;
use townscape_common::{NationId, ResidentId, TownBlockId, TownId, WorldId};
use townscape_domain::{
    Nation, RegenData, RegenQueue, Resident, Saveable, Town, TownBlock, TownWorld,
};
use tracing::trace;

/// The full surface a storage backend must implement to be a drop-in
/// replacement.
///
/// All operations are synchronous and return once backend I/O completes or
/// fails. The trait performs no locking; callers serialize mutation-then-save
/// sequences per entity themselves, which the `&mut self` receivers encode.
///
/// Ordinary backend failures are reported through the boolean results, never
/// panics: a failed runtime write is survivable because the data still lives
/// in memory and the next save may succeed.
pub trait Database {
    /// Produce a backend-specific full snapshot of the stored data.
    fn backup(&mut self) -> bool;

    // Residents

    /// Every resident discoverable in the backend, keyed by identifier.
    ///
    /// An empty backend yields an empty map. Read failures degrade to a
    /// logged empty or partial result rather than an error.
    fn load_residents(&self) -> HashMap<ResidentId, Resident>;

    /// Refresh a single resident from the backend by display name.
    ///
    /// False covers both "not found" and "backend read failed".
    fn load_resident(&mut self, name: &str) -> bool;

    // Towns

    /// Every town discoverable in the backend, keyed by identifier.
    fn load_towns(&self) -> HashMap<TownId, Town>;

    /// Refresh a single town from the backend by name.
    fn load_town(&mut self, name: &str) -> bool;

    // Nations

    /// Every nation discoverable in the backend, keyed by identifier.
    fn load_nations(&self) -> HashMap<NationId, Nation>;

    /// Refresh a single nation from the backend by name.
    fn load_nation(&mut self, name: &str) -> bool;

    // Worlds

    /// Every world discoverable in the backend, keyed by identifier.
    fn load_worlds(&self) -> HashMap<WorldId, TownWorld>;

    /// Refresh a single world from the backend by name.
    fn load_world(&mut self, name: &str) -> bool;

    // Town blocks

    /// Every town block discoverable in the backend, keyed by identifier.
    fn load_town_blocks(&self) -> HashMap<TownBlockId, TownBlock>;

    /// Refresh a single town block from the backend.
    ///
    /// Town blocks are only unique by coordinate within a world, so the
    /// targeted reload takes the full three-part key.
    fn load_town_block(&mut self, x: i32, z: i32, world: WorldId) -> bool;

    /// Unconditional single write, the backend-defined primitive.
    ///
    /// Always writes the entity in full regardless of dirty state;
    /// dirty-awareness lives in [`Database::save_batch`].
    fn save(&mut self, obj: &dyn Saveable) -> bool;

    /// Best-effort batch removal.
    ///
    /// Every entity is attempted even when an earlier removal fails; the
    /// aggregate flag is true only if all of them succeeded.
    fn delete(&mut self, objs: &[&dyn Saveable]) -> bool;

    // Regeneration datasets: full read/write each time, no dirty tracking.

    /// Replace `queue` with the backend's stored regeneration queue.
    fn load_regen_queue(&self, queue: &mut RegenQueue);

    /// Persist the regeneration queue in full.
    fn save_regen_queue(&mut self, queue: &RegenQueue);

    /// Replace `data` with the backend's stored regeneration state.
    fn load_regen_data(&self, data: &mut RegenData);

    /// Persist the regeneration state in full.
    fn save_regen_data(&mut self, data: &RegenData);

    /// Dirty-aware batch save.
    ///
    /// For each entity the dirty capability is queried through
    /// [`Saveable::as_dirty`]:
    /// - tracked and dirty: write it, then clear the flag;
    /// - tracked and clean: skip it, no write issued;
    /// - untracked: always write it.
    ///
    /// Live graphs mutate sparsely between save cycles, so skipping clean
    /// entities keeps I/O proportional to change volume instead of dataset
    /// size. Individual write outcomes are not folded into the result: the
    /// flag is cleared and `true` returned even when an underlying write
    /// reports failure.
    fn save_batch(&mut self, objs: &mut [&mut dyn Saveable]) -> bool {
        for obj in objs.iter_mut() {
            match obj.as_dirty().map(|d| d.is_dirty()) {
                Some(true) => {
                    let _ = self.save(&**obj);
                    if let Some(dirty) = obj.as_dirty_mut() {
                        dirty.set_dirty(false);
                    }
                }
                Some(false) => {
                    trace!(kind = %obj.kind(), id = %obj.uuid(), "skipping clean entity");
                }
                None => {
                    let _ = self.save(&**obj);
                }
            }
        }
        true
    }
}

/// Collection conveniences over [`Database`].
pub trait DatabaseExt: Database {
    /// Thin adapter from any iterable of entities to
    /// [`Database::save_batch`]; contributes no logic of its own.
    ///
    /// Statically dispatched through the blanket impl, so it works on
    /// concrete backends and on `dyn Database` alike.
    fn save_all<'a, I>(&mut self, objs: I) -> bool
    where
        I: IntoIterator<Item = &'a mut dyn Saveable>,
    {
        let mut batch: Vec<&'a mut dyn Saveable> = objs.into_iter().collect();
        self.save_batch(&mut batch)
    }
}

impl<T: Database + ?Sized> DatabaseExt for T {}
