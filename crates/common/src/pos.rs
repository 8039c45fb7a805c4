use crate::WorldId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three-part key of a town block: integer cell coordinates plus the
/// owning world.
///
/// Town blocks are not named; two blocks may share coordinates as long as
/// they live in different worlds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TownBlockPos {
    pub world: WorldId,
    pub x: i32,
    pub z: i32,
}

impl TownBlockPos {
    pub const fn new(world: WorldId, x: i32, z: i32) -> Self {
        Self { world, x, z }
    }
}

impl fmt::Display for TownBlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}@{}", self.x, self.z, self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_coordinates_in_different_worlds_are_distinct() {
        let a = TownBlockPos::new(WorldId::new(), 5, -3);
        let b = TownBlockPos::new(WorldId::new(), 5, -3);
        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn same_key_collapses() {
        let world = WorldId::new();
        let mut set = HashSet::new();
        set.insert(TownBlockPos::new(world, 1, 2));
        set.insert(TownBlockPos::new(world, 1, 2));
        assert_eq!(set.len(), 1);
    }
}
