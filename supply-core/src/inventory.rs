// Inventory access
//
// Verification and picking only need to read slots, so they work against
// the InventoryView trait. GridInventory is the in-memory implementation
// used by the simulation and by tests.

use std::collections::HashMap;

use crate::types::{BlockPos, Dimension, ItemStack};

/// Read-only window onto slotted containers addressed by block position.
pub trait InventoryView {
    /// Number of slots in the container at `pos`, or None when there is no
    /// container there.
    fn slot_count(&self, dimension: &Dimension, pos: BlockPos) -> Option<u32>;

    /// Contents of one slot. None for an empty slot or a missing container.
    fn stack_in_slot(&self, dimension: &Dimension, pos: BlockPos, slot: u32) -> Option<ItemStack>;
}

/// Slotted containers keyed by dimension and position.
#[derive(Clone, Debug, Default)]
pub struct GridInventory {
    containers: HashMap<(Dimension, BlockPos), Vec<Option<ItemStack>>>,
}

impl GridInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an empty container with `slots` slots at `pos`, replacing any
    /// container already there.
    pub fn add_container(&mut self, dimension: Dimension, pos: BlockPos, slots: u32) {
        self.containers
            .insert((dimension, pos), vec![None; slots as usize]);
    }

    /// Insert a stack into the container at `pos`. Merges into the first
    /// slot holding the same item, otherwise takes the first empty slot.
    /// Returns false when the container is missing or full.
    pub fn put(&mut self, dimension: &Dimension, pos: BlockPos, stack: ItemStack) -> bool {
        let Some(slots) = self.containers.get_mut(&(dimension.clone(), pos)) else {
            return false;
        };
        for slot in slots.iter_mut() {
            if let Some(existing) = slot
                && existing.item == stack.item
            {
                existing.count += stack.count;
                return true;
            }
        }
        for slot in slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(stack);
                return true;
            }
        }
        false
    }

    /// Withdraw up to `count` items from one slot. Returns what actually
    /// came out; the slot is cleared when it empties.
    pub fn take(
        &mut self,
        dimension: &Dimension,
        pos: BlockPos,
        slot: u32,
        count: u32,
    ) -> Option<ItemStack> {
        let slots = self.containers.get_mut(&(dimension.clone(), pos))?;
        let entry = slots.get_mut(slot as usize)?;
        let stack = entry.as_mut()?;
        let taken = count.min(stack.count);
        if taken == 0 {
            return None;
        }
        let out = ItemStack::new(stack.item.clone(), taken);
        stack.count -= taken;
        if stack.count == 0 {
            *entry = None;
        }
        Some(out)
    }
}

impl InventoryView for GridInventory {
    fn slot_count(&self, dimension: &Dimension, pos: BlockPos) -> Option<u32> {
        self.containers
            .get(&(dimension.clone(), pos))
            .map(|slots| slots.len() as u32)
    }

    fn stack_in_slot(&self, dimension: &Dimension, pos: BlockPos, slot: u32) -> Option<ItemStack> {
        self.containers
            .get(&(dimension.clone(), pos))?
            .get(slot as usize)?
            .clone()
    }
}
