// Restocking
//
// Policies state how much of an item a site wants on hand. Evaluation
// compares the policies against local stock and turns the deficits into
// orders against supplier networks, largest shortfall first.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, NetworkId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RestockConfig {
    /// Ticks between policy evaluations.
    pub check_interval_ticks: u64,
    /// Expected courier travel time used when a supplier gives no estimate.
    pub default_delivery_ticks: u64,
    /// Grace period past the estimated arrival before an order is written
    /// off as lost.
    pub order_expiry_buffer_ticks: u64,
}

impl Default for RestockConfig {
    fn default() -> Self {
        Self {
            check_interval_ticks: 100,
            default_delivery_ticks: 600,
            order_expiry_buffer_ticks: 200,
        }
    }
}

/// "Keep `target_quantity` of `item` on hand."
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RestockPolicy {
    pub item: ItemId,
    pub target_quantity: u32,
}

/// An outstanding order placed against a supplier network.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RestockOrder {
    pub item: ItemId,
    pub quantity: u32,
    pub requested_at_tick: u64,
    pub supplier_network: NetworkId,
}

impl RestockOrder {
    pub fn estimated_arrival_tick(&self, config: &RestockConfig) -> u64 {
        self.requested_at_tick + config.default_delivery_ticks
    }

    pub fn is_expired(&self, now: u64, config: &RestockConfig) -> bool {
        now > self.estimated_arrival_tick(config) + config.order_expiry_buffer_ticks
    }
}

/// Evaluate `policies` against `local_stock` and place orders for the
/// deficits. `find_supplier` answers which network can supply an item and
/// how much of it is available; policies without a supplier are skipped.
/// Orders come out largest deficit first.
pub fn evaluate_policies(
    policies: &[RestockPolicy],
    local_stock: &HashMap<ItemId, u32>,
    find_supplier: impl Fn(&ItemId) -> Option<(NetworkId, u32)>,
    now: u64,
) -> Vec<RestockOrder> {
    let mut deficits: Vec<(&RestockPolicy, u32)> = policies
        .iter()
        .filter_map(|policy| {
            let on_hand = local_stock.get(&policy.item).copied().unwrap_or(0);
            let deficit = policy.target_quantity.saturating_sub(on_hand);
            (deficit > 0).then_some((policy, deficit))
        })
        .collect();
    deficits.sort_by(|a, b| b.1.cmp(&a.1));

    let mut orders = Vec::new();
    for (policy, deficit) in deficits {
        let Some((network, available)) = find_supplier(&policy.item) else {
            tracing::debug!(target: "restock", item = %policy.item, "no supplier, policy skipped");
            continue;
        };
        let quantity = deficit.min(available);
        if quantity == 0 {
            continue;
        }
        tracing::debug!(
            target: "restock",
            item = %policy.item,
            quantity,
            network = %network,
            "restock order placed"
        );
        orders.push(RestockOrder {
            item: policy.item.clone(),
            quantity,
            requested_at_tick: now,
            supplier_network: network,
        });
    }
    orders
}
