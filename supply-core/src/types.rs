use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use uuid::Uuid;

use crate::error::{Result, SupplyError};

// ============================================================================
// Tokens and identities
// ============================================================================

new_key_type! {
    /// Tracking token allocated by the request manager for each request.
    pub struct RequestToken;
}

/// Identity of the party a request is attributed to. Carried opaquely; the
/// host decides what it maps to (a building, a citizen, ...).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct RequesterId(Uuid);

/// Correlates a delivery leg back to a stock reservation held elsewhere.
/// Pure passthrough: this core never interprets it.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

/// Stable identity of a single resolver.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResolverId(Uuid);

/// Stable identity of a resolver provider aggregate.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProviderId(Uuid);

/// Identity of a remote supplier stock network.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct NetworkId(Uuid);

macro_rules! uuid_id {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// Fresh random identity.
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                pub fn from_uuid(id: Uuid) -> Self {
                    Self(id)
                }

                pub fn as_uuid(&self) -> Uuid {
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
        )+
    };
}

uuid_id!(RequesterId, ReservationId, ResolverId, ProviderId, NetworkId);

// ============================================================================
// World primitives
// ============================================================================

/// Opaque dimension key identifying a world, e.g. `minecraft:overworld`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Dimension(String);

impl Dimension {
    /// Create a dimension key. A blank key is rejected: every location must
    /// name the world it lives in.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(SupplyError::EmptyDimension);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block-grid coordinate within a dimension.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Block face orientation.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

// ============================================================================
// Items
// ============================================================================

/// Namespaced item identifier, e.g. `minecraft:oak_log`.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A quantity of one item kind: the payload descriptor carried by requests
/// and stored in container slots.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }

    /// Same stack with a different count.
    pub fn with_count(&self, count: u32) -> Self {
        Self {
            item: self.item.clone(),
            count,
        }
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.count, self.item)
    }
}
