// Resolvers and providers
//
// A resolver is a storage site's answer to one kind of requestable. Its
// behavior is assembled from components: an optional consumer filter, an
// intake locator for the requester's drop-off point, and a verification
// routine. Providers bundle a site's resolvers under a stable identity.

use crate::inventory::InventoryView;
use crate::location::Location;
use crate::manager::RequestManager;
use crate::picker::pick_for_requestable;
use crate::planner::{emit_children, Pick};
use crate::registry::ItemRegistry;
use crate::requestable::{RequestKind, Requestable};
use crate::types::{BlockPos, ProviderId, RequesterId, RequestToken, ResolverId};
use crate::verifier::{self, VerifierFn};

pub type ConsumerFilter = Box<dyn Fn(&RequesterId) -> bool + Send + Sync>;
pub type IntakeLocator = Box<dyn Fn(&RequesterId) -> Option<Location> + Send + Sync>;

/// The swappable pieces of a resolver's behavior.
pub struct ResolverComponents {
    pub priority: u32,
    pub consumer_filter: Option<ConsumerFilter>,
    pub intake: IntakeLocator,
    pub verifier: VerifierFn,
}

impl ResolverComponents {
    /// Components that serve every requester, drop off at one fixed intake,
    /// and verify with the standard counting routine.
    pub fn standard(priority: u32, intake: Location) -> Self {
        Self {
            priority,
            consumer_filter: None,
            intake: Box::new(move |_| Some(intake.clone())),
            verifier: verifier::is_delivered,
        }
    }
}

/// One storage site's handler for one requestable kind.
pub struct Resolver {
    id: ResolverId,
    location: Location,
    kind: RequestKind,
    racks: Vec<BlockPos>,
    components: ResolverComponents,
}

impl Resolver {
    pub fn new(
        location: Location,
        kind: RequestKind,
        racks: Vec<BlockPos>,
        components: ResolverComponents,
    ) -> Self {
        Self {
            id: ResolverId::new(),
            location,
            kind,
            racks,
            components,
        }
    }

    pub fn id(&self) -> ResolverId {
        self.id
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn priority(&self) -> u32 {
        self.components.priority
    }

    /// Whether this resolver would take on `requestable` for `requester`:
    /// kind and filter must accept, and the racks must currently cover the
    /// required amount.
    pub fn can_resolve(
        &self,
        registry: &ItemRegistry,
        inventory: &dyn InventoryView,
        requester: &RequesterId,
        requestable: &Requestable,
    ) -> bool {
        if requestable.kind() != self.kind {
            return false;
        }
        if let Some(filter) = &self.components.consumer_filter
            && !filter(requester)
        {
            return false;
        }
        let picks = pick_for_requestable(
            registry,
            inventory,
            self.location.dimension(),
            &self.racks,
            requestable,
        );
        picks_satisfy(&picks, requestable)
    }

    /// Plan the fulfillment of `parent`: pick from the racks and emit one
    /// child delivery request per pick, destined for the requester's
    /// intake. None when the stock no longer covers the request or no
    /// intake is known.
    pub fn attempt_resolve<M: RequestManager + ?Sized>(
        &self,
        registry: &ItemRegistry,
        inventory: &dyn InventoryView,
        manager: &mut M,
        parent: RequestToken,
    ) -> Option<Vec<RequestToken>> {
        let request = manager.request(parent)?;
        let requester = request.requester;
        let requestable = request.requestable.clone();

        let dest = (self.components.intake)(&requester)?;
        if !dest.reachable_from(&self.location) {
            tracing::debug!(target: "resolver", resolver = %self.id, "intake unreachable");
            return None;
        }

        let picks = pick_for_requestable(
            registry,
            inventory,
            self.location.dimension(),
            &self.racks,
            &requestable,
        );
        if !picks_satisfy(&picks, &requestable) {
            tracing::debug!(
                target: "resolver",
                resolver = %self.id,
                kind = ?requestable.kind(),
                "stock no longer covers request"
            );
            return None;
        }

        Some(emit_children(manager, parent, &dest, &picks))
    }

    /// Delegate the delivered check to this resolver's verification routine.
    pub fn is_delivered(
        &self,
        registry: &ItemRegistry,
        inventory: &dyn InventoryView,
        dest: &Location,
        requestable: &Requestable,
    ) -> bool {
        (self.components.verifier)(registry, inventory, dest, requestable)
    }
}

/// Whether a pick batch covers the requestable's required amount.
pub fn picks_satisfy(picks: &[Pick], requestable: &Requestable) -> bool {
    let total: u32 = picks.iter().map(|p| p.count).sum();
    total >= requestable.required_count()
}

/// A storage site's resolvers under one stable identity. The resolver list
/// is fixed at construction and handed out in registration order.
pub struct ResolverProvider {
    id: ProviderId,
    resolvers: Vec<Resolver>,
}

impl ResolverProvider {
    pub fn new(id: ProviderId, resolvers: Vec<Resolver>) -> Self {
        Self { id, resolvers }
    }

    pub fn id(&self) -> ProviderId {
        self.id
    }

    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }
}
