// Rack picking
//
// Walks storage racks in the order given and collects picks until the
// requested amount is covered. Each slot is visited once, so a slot can
// never be picked twice within one planning pass.

use crate::inventory::InventoryView;
use crate::location::RackLocation;
use crate::planner::Pick;
use crate::registry::ItemRegistry;
use crate::requestable::{RequestKind, Requestable};
use crate::types::{BlockPos, Dimension, ItemStack};

/// Collect picks for `needed` matching items from `racks`, visited in
/// order. In single-item mode each pick takes exactly one item, for goods
/// that are requested individually such as tools.
pub fn pick_from_racks(
    inventory: &dyn InventoryView,
    dimension: &Dimension,
    racks: &[BlockPos],
    needed: u32,
    mut matches: impl FnMut(&ItemStack) -> bool,
    single_item: bool,
) -> Vec<Pick> {
    let mut picks = Vec::new();
    let mut remaining = needed;

    'racks: for &rack in racks {
        let Some(slots) = inventory.slot_count(dimension, rack) else {
            continue;
        };
        for slot in 0..slots {
            if remaining == 0 {
                break 'racks;
            }
            let Some(stack) = inventory.stack_in_slot(dimension, rack, slot) else {
                continue;
            };
            if !matches(&stack) {
                continue;
            }
            let take = if single_item {
                1
            } else {
                remaining.min(stack.count)
            };
            picks.push(Pick {
                source: RackLocation::new(dimension.clone(), rack, None, Some(slot)).into(),
                payload: stack.with_count(take),
                count: take,
                reservation_id: None,
            });
            remaining -= take;
        }
        if remaining == 0 {
            break;
        }
    }

    tracing::debug!(
        target: "picker",
        needed,
        covered = needed - remaining,
        picks = picks.len(),
        "rack pick finished"
    );
    picks
}

/// Pick for a requestable, dispatching count and match semantics through
/// the requestable itself. Tools pick in single-item mode.
pub fn pick_for_requestable(
    registry: &ItemRegistry,
    inventory: &dyn InventoryView,
    dimension: &Dimension,
    racks: &[BlockPos],
    requestable: &Requestable,
) -> Vec<Pick> {
    let single_item = requestable.kind() == RequestKind::Tool;
    pick_from_racks(
        inventory,
        dimension,
        racks,
        requestable.required_count(),
        |stack| requestable.matches(registry, stack),
        single_item,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::GridInventory;
    use crate::location::Location;
    use crate::registry::{ItemDef, ItemRegistryBuilder, ToolKind};
    use crate::requestable::Tool;
    use crate::types::ItemId;

    fn overworld() -> Dimension {
        Dimension::new("overworld").unwrap()
    }

    fn logs(count: u32) -> ItemStack {
        ItemStack::new(ItemId::new("minecraft:oak_log"), count)
    }

    #[test]
    fn test_picks_in_rack_order_and_stops_when_covered() {
        let dim = overworld();
        let mut inv = GridInventory::new();
        let racks = [
            BlockPos::new(0, 64, 0),
            BlockPos::new(1, 64, 0),
            BlockPos::new(2, 64, 0),
        ];
        for rack in racks {
            inv.add_container(dim.clone(), rack, 4);
        }
        inv.put(&dim, racks[0], logs(40));
        inv.put(&dim, racks[1], logs(40));
        inv.put(&dim, racks[2], logs(40));

        let picks = pick_from_racks(&inv, &dim, &racks, 64, |s| s.item == logs(1).item, false);
        assert_eq!(picks.len(), 2, "third rack must be untouched");
        assert_eq!(picks[0].count, 40);
        assert_eq!(picks[1].count, 24, "second pick only covers the shortfall");
        assert_eq!(picks[0].source.pos(), racks[0]);
        assert_eq!(picks[1].source.pos(), racks[1]);
    }

    #[test]
    fn test_pick_records_source_slot() {
        let dim = overworld();
        let mut inv = GridInventory::new();
        let rack = BlockPos::new(0, 64, 0);
        inv.add_container(dim.clone(), rack, 4);
        inv.put(&dim, rack, ItemStack::new(ItemId::new("minecraft:stone"), 8));
        inv.put(&dim, rack, logs(16));

        let picks = pick_from_racks(&inv, &dim, &[rack], 16, |s| s.item == logs(1).item, false);
        assert_eq!(picks.len(), 1);
        let Location::Rack(source) = &picks[0].source else {
            panic!("pick source must be a rack location");
        };
        assert_eq!(source.slot(), Some(1), "logs sit in the second slot");
    }

    #[test]
    fn test_tool_pick_takes_single_item() {
        let mut builder = ItemRegistryBuilder::new();
        builder.register(ItemDef::new(ItemId::new("minecraft:iron_axe")).tool(ToolKind::Axe, 2));
        let reg = builder.freeze();

        let dim = overworld();
        let mut inv = GridInventory::new();
        let rack = BlockPos::new(0, 64, 0);
        inv.add_container(dim.clone(), rack, 4);
        inv.put(&dim, rack, ItemStack::new(ItemId::new("minecraft:iron_axe"), 3));

        let want = Requestable::Tool(Tool {
            kind: ToolKind::Axe,
            min_level: 1,
        });
        let picks = pick_for_requestable(&reg, &inv, &dim, &[rack], &want);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].count, 1, "tools are picked one at a time");
        assert_eq!(picks[0].payload.count, 1);
    }

    #[test]
    fn test_shortfall_returns_partial_picks() {
        let dim = overworld();
        let mut inv = GridInventory::new();
        let rack = BlockPos::new(0, 64, 0);
        inv.add_container(dim.clone(), rack, 4);
        inv.put(&dim, rack, logs(10));

        let picks = pick_from_racks(&inv, &dim, &[rack], 64, |s| s.item == logs(1).item, false);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].count, 10);
    }
}
