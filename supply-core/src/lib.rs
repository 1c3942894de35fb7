// supply-core: request decomposition and fulfillment tracking for a
// tick-based colony supply network.
//
// Modules:
// - types: identifiers, positions, item stacks
// - error: crate-wide error type
// - registry: item classification, built then frozen
// - location: rack and intake addresses, reachability
// - requestable: the closed set of request kinds and delivery legs
// - manager: request storage and lifecycle
// - planner: pick batches into child delivery requests
// - inventory: slotted container access
// - verifier: delivered-or-not checks
// - picker: rack walking
// - resolver: per-site request handling and providers
// - staging: queued network broadcasts
// - restock: policy-driven reordering
// - keeper: the stock keeper's tick behavior
// - config: JSON tunables

pub mod config;
pub mod error;
pub mod inventory;
pub mod keeper;
pub mod location;
pub mod manager;
pub mod picker;
pub mod planner;
pub mod registry;
pub mod requestable;
pub mod resolver;
pub mod restock;
pub mod staging;
pub mod types;
pub mod verifier;

pub use config::SupplyConfig;
pub use error::{Result, SupplyError};
pub use inventory::{GridInventory, InventoryView};
pub use location::{IntakeLocation, Location, RackLocation};
pub use manager::{Request, RequestManager, RequestState, StandardRequestManager};
pub use planner::{Pick, emit_children};
pub use registry::{ItemDef, ItemRegistry, ItemRegistryBuilder, ToolKind};
pub use requestable::{
    Burnable, DeliverStack, Food, RequestKind, Requestable, Stack, StackList, Tag, Tool,
};
pub use resolver::{Resolver, ResolverComponents, ResolverProvider};
pub use staging::{StagingRequest, StagingState};
pub use types::{
    BlockPos, Dimension, Direction, ItemId, ItemStack, NetworkId, ProviderId, RequestToken,
    RequesterId, ReservationId, ResolverId,
};
pub use verifier::{VerifierFn, is_delivered, verify};
