// Item classification registry
//
// Matchers need to know whether an item is food, fuel, a tool of some kind,
// or carries a tag. Hosts describe their items during a build phase, freeze
// the registry once at startup, and only the frozen, query-only form is ever
// handed to pickers and verifiers. There is no ambient global registry.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::ItemId;

/// Tool categories a tool request can ask for.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ToolKind {
    Axe,
    Pickaxe,
    Shovel,
    Hoe,
    Sword,
    Shears,
    FishingRod,
}

/// Classification of one item kind: everything the request matchers can ask
/// about it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub tags: BTreeSet<String>,
    pub edible: bool,
    /// Tool category and tier level, if this item is a tool.
    pub tool: Option<(ToolKind, u32)>,
    /// Furnace burn time in ticks; zero means not a fuel.
    pub burn_time: u32,
}

impl ItemDef {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            tags: BTreeSet::new(),
            edible: false,
            tool: None,
            burn_time: 0,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn edible(mut self) -> Self {
        self.edible = true;
        self
    }

    pub fn tool(mut self, kind: ToolKind, level: u32) -> Self {
        self.tool = Some((kind, level));
        self
    }

    pub fn burnable(mut self, burn_time: u32) -> Self {
        self.burn_time = burn_time;
        self
    }
}

/// Build phase of the registry lifecycle. Registration is last-write-wins;
/// `freeze` moves to the query phase and no further mutation is possible.
#[derive(Debug, Default)]
pub struct ItemRegistryBuilder {
    items: HashMap<ItemId, ItemDef>,
}

impl ItemRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: ItemDef) -> &mut Self {
        if self.items.insert(def.id.clone(), def).is_some() {
            tracing::debug!(target: "registry", "item re-registered, keeping last definition");
        }
        self
    }

    /// End the build phase. The returned registry is query-only.
    pub fn freeze(self) -> ItemRegistry {
        tracing::debug!(target: "registry", items = self.items.len(), "item registry frozen");
        ItemRegistry { items: self.items }
    }
}

/// Frozen, query-only item classification registry.
#[derive(Clone, Debug)]
pub struct ItemRegistry {
    items: HashMap<ItemId, ItemDef>,
}

impl ItemRegistry {
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn has_tag(&self, id: &ItemId, tag: &str) -> bool {
        self.items
            .get(id)
            .is_some_and(|def| def.tags.contains(tag))
    }

    pub fn is_food(&self, id: &ItemId) -> bool {
        self.items.get(id).is_some_and(|def| def.edible)
    }

    pub fn tool(&self, id: &ItemId) -> Option<(ToolKind, u32)> {
        self.items.get(id).and_then(|def| def.tool)
    }

    /// Burn time in ticks; zero for unknown items and non-fuels.
    pub fn burn_time(&self, id: &ItemId) -> u32 {
        self.items.get(id).map_or(0, |def| def.burn_time)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ItemId {
        ItemId::new(id)
    }

    #[test]
    fn test_frozen_registry_answers_queries() {
        let mut builder = ItemRegistryBuilder::new();
        builder
            .register(ItemDef::new(item("minecraft:oak_log")).with_tag("minecraft:logs"))
            .register(ItemDef::new(item("minecraft:bread")).edible())
            .register(ItemDef::new(item("minecraft:iron_axe")).tool(ToolKind::Axe, 2))
            .register(ItemDef::new(item("minecraft:coal")).burnable(1600));
        let registry = builder.freeze();

        assert!(registry.has_tag(&item("minecraft:oak_log"), "minecraft:logs"));
        assert!(!registry.has_tag(&item("minecraft:bread"), "minecraft:logs"));
        assert!(registry.is_food(&item("minecraft:bread")));
        assert_eq!(registry.tool(&item("minecraft:iron_axe")), Some((ToolKind::Axe, 2)));
        assert_eq!(registry.burn_time(&item("minecraft:coal")), 1600);

        // Unknown items answer negatively, never error.
        assert!(!registry.contains(&item("minecraft:diamond")));
        assert_eq!(registry.burn_time(&item("minecraft:diamond")), 0);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut builder = ItemRegistryBuilder::new();
        builder
            .register(ItemDef::new(item("minecraft:stick")))
            .register(ItemDef::new(item("minecraft:stick")).burnable(100));
        let registry = builder.freeze();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.burn_time(&item("minecraft:stick")), 100);
    }
}
