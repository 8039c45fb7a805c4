use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Defines a per-category identifier newtype over [`Uuid`].
///
/// Every entity category keys on its own identifier type so that, for
/// example, a nation's member list cannot be indexed with a resident id.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an identifier read back from a backend.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub const fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Unique identifier of a resident.
    ResidentId
);
entity_id!(
    /// Unique identifier of a town.
    TownId
);
entity_id!(
    /// Unique identifier of a nation.
    NationId
);
entity_id!(
    /// Unique identifier of a world.
    WorldId
);
entity_id!(
    /// Unique identifier of a town block.
    TownBlockId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = ResidentId::new();
        let b = ResidentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_round_trips_through_uuid() {
        let id = TownId::new();
        assert_eq!(TownId::from_uuid(id.as_uuid()), id);
    }
}
