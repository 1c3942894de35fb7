// Delivery planning
//
// Turns a batch of inventory picks into child delivery requests under a
// parent. Planning tolerates partial failure: a pick that cannot become a
// valid delivery leg is logged and skipped, and the surviving picks still
// become children in their original order.

use crate::location::Location;
use crate::manager::RequestManager;
use crate::requestable::{DeliverStack, Requestable};
use crate::types::{ItemStack, RequestToken, ReservationId};

/// One candidate withdrawal produced by the rack picker: take `count` of
/// `payload` from `source`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pick {
    pub source: Location,
    pub payload: ItemStack,
    pub count: u32,
    pub reservation_id: Option<ReservationId>,
}

/// Emit one child delivery request per usable pick, all destined for `dest`.
///
/// Returns the tokens of the children that were created, in pick order. An
/// unresolvable parent yields no children at all; an individual bad pick
/// only costs that pick.
pub fn emit_children<M: RequestManager + ?Sized>(
    manager: &mut M,
    parent: RequestToken,
    dest: &Location,
    picks: &[Pick],
) -> Vec<RequestToken> {
    if manager.requester_of(parent).is_none() {
        tracing::warn!(target: "delivery", ?parent, "parent request unknown, no children emitted");
        return Vec::new();
    }

    let mut children = Vec::with_capacity(picks.len());
    for pick in picks {
        let leg = match DeliverStack::new(
            pick.source.clone(),
            dest.clone(),
            pick.payload.clone(),
            pick.count,
            pick.reservation_id,
        ) {
            Ok(leg) => leg,
            Err(err) => {
                tracing::warn!(
                    target: "delivery",
                    ?parent,
                    item = %pick.payload.item,
                    count = pick.count,
                    %err,
                    "skipping unusable pick"
                );
                continue;
            }
        };

        match manager.create_child(parent, Requestable::Deliver(leg)) {
            Ok(token) => children.push(token),
            Err(err) => {
                tracing::warn!(
                    target: "delivery",
                    ?parent,
                    item = %pick.payload.item,
                    %err,
                    "skipping pick, child creation failed"
                );
            }
        }
    }

    tracing::debug!(
        target: "delivery",
        ?parent,
        picked = picks.len(),
        emitted = children.len(),
        "delivery plan emitted"
    );
    children
}
