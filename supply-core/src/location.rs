// Location values for requests and deliveries
//
// Reachability is deliberately coarse: two locations are reachable iff they
// share a dimension. Callers must not read physical traversability into it;
// real pathing is checked elsewhere by the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{BlockPos, Dimension, Direction};

/// A storage point inside a rack: position plus the face and slot the picker
/// selected, so a courier can pull from exactly the right place.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct RackLocation {
    dimension: Dimension,
    pos: BlockPos,
    face: Option<Direction>,
    slot: Option<u32>,
}

impl RackLocation {
    pub fn new(
        dimension: Dimension,
        pos: BlockPos,
        face: Option<Direction>,
        slot: Option<u32>,
    ) -> Self {
        Self {
            dimension,
            pos,
            face,
            slot,
        }
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    pub fn face(&self) -> Option<Direction> {
        self.face
    }

    pub fn slot(&self) -> Option<u32> {
        self.slot
    }
}

impl fmt::Display for RackLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rack {} @ {}", self.pos, self.dimension)
    }
}

/// The drop-off point where a building accepts incoming deliveries.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct IntakeLocation {
    dimension: Dimension,
    pos: BlockPos,
}

impl IntakeLocation {
    pub fn new(dimension: Dimension, pos: BlockPos) -> Self {
        Self { dimension, pos }
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn pos(&self) -> BlockPos {
        self.pos
    }
}

impl fmt::Display for IntakeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "intake {} @ {}", self.pos, self.dimension)
    }
}

/// Any location value the request system hands to or accepts from the host.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Location {
    Rack(RackLocation),
    Intake(IntakeLocation),
}

impl Location {
    pub fn dimension(&self) -> &Dimension {
        match self {
            Location::Rack(r) => r.dimension(),
            Location::Intake(i) => i.dimension(),
        }
    }

    pub fn pos(&self) -> BlockPos {
        match self {
            Location::Rack(r) => r.pos(),
            Location::Intake(i) => i.pos(),
        }
    }

    /// Coarse reachability oracle: true iff both locations are in the same
    /// dimension, regardless of distance or obstruction.
    pub fn reachable_from(&self, other: &Location) -> bool {
        self.dimension() == other.dimension()
    }
}

impl From<RackLocation> for Location {
    fn from(loc: RackLocation) -> Self {
        Location::Rack(loc)
    }
}

impl From<IntakeLocation> for Location {
    fn from(loc: IntakeLocation) -> Self {
        Location::Intake(loc)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Rack(r) => r.fmt(f),
            Location::Intake(i) => i.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(key: &str) -> Dimension {
        Dimension::new(key).unwrap()
    }

    #[test]
    fn test_structural_equality_over_all_fields() {
        let a = RackLocation::new(
            dim("overworld"),
            BlockPos::new(1, 2, 3),
            Some(Direction::North),
            Some(4),
        );
        let b = RackLocation::new(
            dim("overworld"),
            BlockPos::new(1, 2, 3),
            Some(Direction::North),
            Some(4),
        );
        assert_eq!(a, b);

        // Any single differing field breaks equality.
        let other_slot = RackLocation::new(
            dim("overworld"),
            BlockPos::new(1, 2, 3),
            Some(Direction::North),
            Some(5),
        );
        let other_face =
            RackLocation::new(dim("overworld"), BlockPos::new(1, 2, 3), None, Some(4));
        let other_pos = RackLocation::new(
            dim("overworld"),
            BlockPos::new(9, 2, 3),
            Some(Direction::North),
            Some(4),
        );
        let other_dim = RackLocation::new(
            dim("nether"),
            BlockPos::new(1, 2, 3),
            Some(Direction::North),
            Some(4),
        );
        assert_ne!(a, other_slot);
        assert_ne!(a, other_face);
        assert_ne!(a, other_pos);
        assert_ne!(a, other_dim);
    }

    #[test]
    fn test_equal_locations_hash_identically() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Location::from(IntakeLocation::new(
            dim("overworld"),
            BlockPos::new(0, 64, 0),
        )));
        // Duplicate value deduplicates.
        let inserted = set.insert(Location::from(IntakeLocation::new(
            dim("overworld"),
            BlockPos::new(0, 64, 0),
        )));
        assert!(!inserted);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_reachable_iff_same_dimension() {
        let near: Location = IntakeLocation::new(dim("overworld"), BlockPos::new(0, 64, 0)).into();
        let far: Location =
            RackLocation::new(dim("overworld"), BlockPos::new(100_000, 64, -100_000), None, None)
                .into();
        let nether: Location = IntakeLocation::new(dim("nether"), BlockPos::new(0, 64, 0)).into();

        // Distance is irrelevant, only the dimension matters.
        assert!(near.reachable_from(&far));
        assert!(far.reachable_from(&near));
        assert!(!near.reachable_from(&nether));
    }
}
