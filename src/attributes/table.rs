//! Per-tick attribute table.
//!
//! The table is never patched incrementally. Every tick, undo and redo calls
//! [`AttributeTable::refresh`] to reseed category-level inherent attributes
//! from the catalog, then re-applies the currently derived persistent rules.

use rustc_hash::FxHashMap;

use crate::core::{AttributeCategory, CategoryId, EntityTypeId};
use crate::grid::{Block, Catalog};

use super::set::AttributeSet;

/// Entity type → attributes and category → attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeTable {
    types: FxHashMap<EntityTypeId, AttributeSet>,
    categories: FxHashMap<CategoryId, AttributeSet>,
}

impl AttributeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every attribute.
    pub fn clear(&mut self) {
        self.types.clear();
        self.categories.clear();
    }

    /// Clear both tables and reseed inherent category attributes.
    ///
    /// Idempotent: two calls without intervening changes leave equal tables.
    pub fn refresh(&mut self, catalog: &Catalog) {
        self.clear();
        for &(category, inherent) in catalog.inherent() {
            if !inherent.is_empty() {
                *self.categories.entry(category).or_default() |= inherent;
            }
        }
    }

    /// Grant an attribute to one entity type.
    pub fn grant_type(&mut self, entity_type: EntityTypeId, attribute: AttributeCategory) {
        self.types.entry(entity_type).or_default().insert(attribute);
    }

    /// Grant an attribute to a whole category.
    pub fn grant_category(&mut self, category: CategoryId, attribute: AttributeCategory) {
        self.categories.entry(category).or_default().insert(attribute);
    }

    /// Attributes held by an entity type through its own facts or its category's.
    #[must_use]
    pub fn resolve(&self, entity_type: EntityTypeId, category: Option<CategoryId>) -> AttributeSet {
        let own = self.types.get(&entity_type).copied().unwrap_or_default();
        let shared = category
            .and_then(|category| self.categories.get(&category).copied())
            .unwrap_or_default();
        own | shared
    }

    /// Type-specific facts first, then category-level facts.
    #[must_use]
    pub fn has_attribute(
        &self,
        entity_type: EntityTypeId,
        category: Option<CategoryId>,
        attribute: AttributeCategory,
    ) -> bool {
        if self.types.get(&entity_type).is_some_and(|set| set.contains(attribute)) {
            return true;
        }
        category
            .and_then(|category| self.categories.get(&category))
            .is_some_and(|set| set.contains(attribute))
    }

    /// Attributes of a block under the current table.
    #[must_use]
    pub fn of_block(&self, catalog: &Catalog, block: &Block) -> AttributeSet {
        self.resolve(block.entity_type, catalog.category(block.entity_type))
    }

    /// True if a block currently has the attribute.
    #[must_use]
    pub fn block_has(&self, catalog: &Catalog, block: &Block, attribute: AttributeCategory) -> bool {
        self.has_attribute(block.entity_type, catalog.category(block.entity_type), attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfigSet, EntityCategoryDescriptor, EntityTypeDescriptor};

    const OBJECTS: CategoryId = CategoryId::new(0);
    const TEXT: CategoryId = CategoryId::new(1);
    const ROCK: EntityTypeId = EntityTypeId::new(1);
    const WORD: EntityTypeId = EntityTypeId::new(2);

    fn catalog() -> Catalog {
        let config = ConfigSet::new()
            .with_category(EntityCategoryDescriptor::new(OBJECTS, "Object"))
            .with_category(EntityCategoryDescriptor::new(TEXT, "Text").with_inherent(AttributeCategory::Push))
            .with_entity_type(EntityTypeDescriptor::new(ROCK, "Rock", OBJECTS))
            .with_entity_type(EntityTypeDescriptor::new(WORD, "ROCK", TEXT));
        Catalog::build(&config).unwrap()
    }

    #[test]
    fn test_refresh_seeds_inherent() {
        let catalog = catalog();
        let mut table = AttributeTable::new();
        table.refresh(&catalog);

        assert!(table.has_attribute(WORD, Some(TEXT), AttributeCategory::Push));
        assert!(!table.has_attribute(ROCK, Some(OBJECTS), AttributeCategory::Push));
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let catalog = catalog();
        let mut table = AttributeTable::new();
        table.grant_type(ROCK, AttributeCategory::Stop);

        table.refresh(&catalog);
        let first = table.clone();
        table.refresh(&catalog);

        assert_eq!(table, first);
        assert!(!table.has_attribute(ROCK, Some(OBJECTS), AttributeCategory::Stop));
    }

    #[test]
    fn test_type_and_category_facts_combine() {
        let mut table = AttributeTable::new();
        table.grant_type(ROCK, AttributeCategory::Win);
        table.grant_category(OBJECTS, AttributeCategory::Defeat);

        let set = table.resolve(ROCK, Some(OBJECTS));
        assert!(set.contains(AttributeCategory::Win));
        assert!(set.contains(AttributeCategory::Defeat));
        assert!(table.has_attribute(ROCK, None, AttributeCategory::Win));
        assert!(!table.has_attribute(ROCK, None, AttributeCategory::Defeat));
    }
}
