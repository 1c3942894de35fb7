// Requestable kinds
//
// A requestable is an immutable description of a desired outcome submitted
// to the request manager. The closed set of kinds lives in one enum so
// matching, counting, and verification dispatch in one place instead of six
// near-duplicate interfaces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SupplyError};
use crate::location::Location;
use crate::registry::{ItemRegistry, ToolKind};
use crate::types::{ItemId, ItemStack, ReservationId};

// ============================================================================
// Demand-side kinds
// ============================================================================

/// "N of this exact item", accepting at least `min_count` for partial
/// fulfillment.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub item: ItemId,
    pub count: u32,
    pub min_count: u32,
}

impl Stack {
    pub fn new(item: ItemId, count: u32) -> Self {
        Self {
            item,
            count,
            min_count: count,
        }
    }

    pub fn with_min_count(mut self, min_count: u32) -> Self {
        self.min_count = min_count;
        self
    }
}

/// "N of anything edible."
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub count: u32,
}

/// "One tool of this kind, at least this tier."
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub kind: ToolKind,
    pub min_level: u32,
}

/// "N of anything carrying this tag."
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub tag: String,
    pub count: u32,
    pub min_count: u32,
}

/// "N drawn from any of these item kinds."
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct StackList {
    pub items: Vec<ItemId>,
    pub count: u32,
    pub min_count: u32,
}

/// "N of anything a furnace accepts as fuel."
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Burnable {
    pub count: u32,
}

// ============================================================================
// DeliverStack - the delivery leg
// ============================================================================

/// One concrete delivery leg: move `count` of `payload` from `source` to
/// `dest`. Created transiently by the delivery planner per pick, wrapped
/// into a request, and discarded once the request reaches a terminal state.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeliverStack {
    source: Location,
    dest: Location,
    payload: ItemStack,
    count: u32,
    reservation_id: Option<ReservationId>,
}

impl DeliverStack {
    /// Build a delivery leg. Rejects a zero count before the leg can enter
    /// the system; a leg that moves nothing is meaningless.
    pub fn new(
        source: Location,
        dest: Location,
        payload: ItemStack,
        count: u32,
        reservation_id: Option<ReservationId>,
    ) -> Result<Self> {
        if count == 0 {
            return Err(SupplyError::InvalidCount);
        }
        Ok(Self {
            source,
            dest,
            payload,
            count,
            reservation_id,
        })
    }

    pub fn source(&self) -> &Location {
        &self.source
    }

    pub fn dest(&self) -> &Location {
        &self.dest
    }

    pub fn payload(&self) -> &ItemStack {
        &self.payload
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reservation_id(&self) -> Option<ReservationId> {
        self.reservation_id
    }
}

impl fmt::Display for DeliverStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deliver {} x{} from {} to {}",
            self.payload.item, self.count, self.source, self.dest
        )
    }
}

// ============================================================================
// The closed set
// ============================================================================

/// Kind tag for resolver routing.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum RequestKind {
    Stack,
    Food,
    Tool,
    Tag,
    StackList,
    Burnable,
    Deliver,
}

impl RequestKind {
    /// Kinds the stock keeper's resolvers accept. Delivery legs are fulfilled
    /// by couriers, not re-resolved.
    pub fn is_supply_kind(self) -> bool {
        !matches!(self, RequestKind::Deliver)
    }
}

/// Every requestable the system understands.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Requestable {
    Stack(Stack),
    Food(Food),
    Tool(Tool),
    Tag(Tag),
    StackList(StackList),
    Burnable(Burnable),
    Deliver(DeliverStack),
}

impl Requestable {
    pub fn kind(&self) -> RequestKind {
        match self {
            Requestable::Stack(_) => RequestKind::Stack,
            Requestable::Food(_) => RequestKind::Food,
            Requestable::Tool(_) => RequestKind::Tool,
            Requestable::Tag(_) => RequestKind::Tag,
            Requestable::StackList(_) => RequestKind::StackList,
            Requestable::Burnable(_) => RequestKind::Burnable,
            Requestable::Deliver(_) => RequestKind::Deliver,
        }
    }

    /// Minimum number of matching items that must be present at the
    /// destination before the request counts as satisfied. Stack-shaped
    /// kinds honor the larger of count and min-count; a tool request needs
    /// exactly one.
    pub fn required_count(&self) -> u32 {
        match self {
            Requestable::Stack(s) => s.count.max(s.min_count),
            Requestable::Tag(t) => t.count.max(t.min_count),
            Requestable::StackList(l) => l.count.max(l.min_count),
            Requestable::Tool(_) => 1,
            Requestable::Food(f) => f.count,
            Requestable::Burnable(b) => b.count,
            Requestable::Deliver(d) => d.count(),
        }
    }

    /// Whether `stack` satisfies this requestable's item predicate.
    pub fn matches(&self, registry: &ItemRegistry, stack: &ItemStack) -> bool {
        match self {
            Requestable::Stack(s) => s.item == stack.item,
            Requestable::Food(_) => registry.is_food(&stack.item),
            Requestable::Tool(t) => registry
                .tool(&stack.item)
                .is_some_and(|(kind, level)| kind == t.kind && level >= t.min_level),
            Requestable::Tag(t) => registry.has_tag(&stack.item, &t.tag),
            Requestable::StackList(l) => l.items.contains(&stack.item),
            Requestable::Burnable(_) => registry.burn_time(&stack.item) > 0,
            Requestable::Deliver(d) => d.payload().item == stack.item,
        }
    }
}
