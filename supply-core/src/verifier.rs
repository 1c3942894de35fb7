// Delivery verification
//
// One counting routine answers "has this requestable been satisfied at this
// location" for every requestable kind. Verification is a pure read of the
// inventory: it never mutates, and anything it cannot see simply counts as
// not delivered.

use crate::inventory::InventoryView;
use crate::location::Location;
use crate::registry::ItemRegistry;
use crate::requestable::Requestable;

/// Signature of a pluggable verification routine, carried by resolver
/// components.
pub type VerifierFn = fn(&ItemRegistry, &dyn InventoryView, &Location, &Requestable) -> bool;

/// Count matching items in the container at `dest` until `needed` is
/// reached. A zero requirement is vacuously satisfied; a missing container
/// satisfies nothing.
pub fn verify(
    inventory: &dyn InventoryView,
    dest: &Location,
    needed: u32,
    mut matches: impl FnMut(&crate::types::ItemStack) -> bool,
) -> bool {
    if needed == 0 {
        return true;
    }
    let Some(slots) = inventory.slot_count(dest.dimension(), dest.pos()) else {
        return false;
    };

    let mut found = 0u32;
    for slot in 0..slots {
        if let Some(stack) = inventory.stack_in_slot(dest.dimension(), dest.pos(), slot)
            && matches(&stack)
        {
            found = found.saturating_add(stack.count);
            if found >= needed {
                return true;
            }
        }
    }
    false
}

/// Whether `requestable` is satisfied by what currently sits at `dest`.
pub fn is_delivered(
    registry: &ItemRegistry,
    inventory: &dyn InventoryView,
    dest: &Location,
    requestable: &Requestable,
) -> bool {
    verify(inventory, dest, requestable.required_count(), |stack| {
        requestable.matches(registry, stack)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::GridInventory;
    use crate::registry::{ItemDef, ItemRegistryBuilder, ToolKind};
    use crate::requestable::{Stack, Tool};
    use crate::types::{BlockPos, Dimension, ItemId, ItemStack};

    fn registry() -> ItemRegistry {
        let mut builder = ItemRegistryBuilder::new();
        builder
            .register(ItemDef::new(ItemId::new("minecraft:oak_log")))
            .register(ItemDef::new(ItemId::new("minecraft:iron_axe")).tool(ToolKind::Axe, 2));
        builder.freeze()
    }

    fn dest() -> Location {
        crate::location::IntakeLocation::new(
            Dimension::new("overworld").unwrap(),
            BlockPos::new(0, 64, 0),
        )
        .into()
    }

    #[test]
    fn test_counts_across_slots() {
        let reg = registry();
        let mut inv = GridInventory::new();
        let dim = Dimension::new("overworld").unwrap();
        inv.add_container(dim.clone(), BlockPos::new(0, 64, 0), 9);
        inv.put(&dim, BlockPos::new(0, 64, 0), ItemStack::new(ItemId::new("minecraft:oak_log"), 40));
        inv.put(&dim, BlockPos::new(0, 64, 0), ItemStack::new(ItemId::new("minecraft:iron_axe"), 1));

        let want_64 = Requestable::Stack(Stack::new(ItemId::new("minecraft:oak_log"), 64));
        assert!(!is_delivered(&reg, &inv, &dest(), &want_64));

        inv.put(&dim, BlockPos::new(0, 64, 0), ItemStack::new(ItemId::new("minecraft:oak_log"), 24));
        assert!(is_delivered(&reg, &inv, &dest(), &want_64));

        let want_axe = Requestable::Tool(Tool {
            kind: ToolKind::Axe,
            min_level: 1,
        });
        assert!(is_delivered(&reg, &inv, &dest(), &want_axe));
    }

    #[test]
    fn test_missing_container_is_false_not_error() {
        let reg = registry();
        let inv = GridInventory::new();
        let want = Requestable::Stack(Stack::new(ItemId::new("minecraft:oak_log"), 1));
        assert!(!is_delivered(&reg, &inv, &dest(), &want));
    }

    #[test]
    fn test_verification_is_idempotent() {
        let reg = registry();
        let mut inv = GridInventory::new();
        let dim = Dimension::new("overworld").unwrap();
        inv.add_container(dim.clone(), BlockPos::new(0, 64, 0), 4);
        inv.put(&dim, BlockPos::new(0, 64, 0), ItemStack::new(ItemId::new("minecraft:oak_log"), 8));

        let want = Requestable::Stack(Stack::new(ItemId::new("minecraft:oak_log"), 8));
        let first = is_delivered(&reg, &inv, &dest(), &want);
        let second = is_delivered(&reg, &inv, &dest(), &want);
        assert!(first && second, "repeated checks must agree");
        assert_eq!(
            inv.stack_in_slot(&dim, BlockPos::new(0, 64, 0), 0).unwrap().count,
            8,
            "verification must not consume items"
        );
    }
}
