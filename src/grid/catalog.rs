//! Validated entity-type lookup for the duration of one game.
//!
//! `Catalog::build` walks the whole config through a `ConfigPort` once, at
//! game start, and fails loudly on any dangling reference. After that every
//! lookup a tick performs is infallible in practice: the tick pipeline never
//! sees a config error.

use rustc_hash::FxHashMap;

use crate::attributes::AttributeSet;
use crate::core::{
    CategoryId, ConfigPort, EngineError, EntityTypeId, Keyword, MapDescriptor, Result, RuleWord,
};

/// Per-type facts needed during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    pub category: CategoryId,
    pub word: Option<RuleWord>,
}

/// Snapshot of the config facts a running game consults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    types: FxHashMap<EntityTypeId, TypeInfo>,

    /// Inherent attributes per category, in declaration order.
    inherent: Vec<(CategoryId, AttributeSet)>,
}

impl Catalog {
    /// Build and validate a catalog from a config port.
    ///
    /// Fails if any entity type names an unknown category, or any rule word
    /// names an unknown entity type or category.
    pub fn build<C: ConfigPort + ?Sized>(config: &C) -> Result<Self> {
        let mut types = FxHashMap::default();

        for descriptor in config.entity_types() {
            config.require_category(descriptor.category)?;
            match descriptor.word {
                Some(RuleWord::EntityType(target)) => {
                    config.require_entity_type(target)?;
                }
                Some(RuleWord::Category(target)) => {
                    config.require_category(target)?;
                }
                Some(RuleWord::Attribute(_)) | Some(RuleWord::Keyword(_)) | None => {}
            }
            types.insert(
                descriptor.id,
                TypeInfo {
                    category: descriptor.category,
                    word: descriptor.word,
                },
            );
        }

        let inherent = config
            .categories()
            .iter()
            .map(|category| (category.id, category.inherent.iter().copied().collect()))
            .collect();

        Ok(Self { types, inherent })
    }

    /// Check that a map only references known entity types and stays on its grid.
    pub fn validate_map(&self, map: &MapDescriptor) -> Result<()> {
        if map.width == 0 || map.height == 0 {
            return Err(EngineError::EmptyMap(map.id));
        }
        // Positions are i32, so every cell index must fit one.
        if i32::try_from(map.width).is_err() || i32::try_from(map.height).is_err() {
            return Err(EngineError::MapTooLarge {
                map: map.id,
                width: map.width,
                height: map.height,
            });
        }
        for placed in &map.blocks {
            self.require(placed.entity_type)?;
            if !map.contains(placed.position) {
                return Err(EngineError::BlockOutOfBounds {
                    map: map.id,
                    position: placed.position,
                    width: map.width,
                    height: map.height,
                });
            }
        }
        Ok(())
    }

    /// Look up a type, failing loudly if it is unknown.
    pub fn require(&self, entity_type: EntityTypeId) -> Result<&TypeInfo> {
        self.types
            .get(&entity_type)
            .ok_or(EngineError::UnknownEntityType(entity_type))
    }

    #[must_use]
    pub fn get(&self, entity_type: EntityTypeId) -> Option<&TypeInfo> {
        self.types.get(&entity_type)
    }

    /// Category of an entity type.
    #[must_use]
    pub fn category(&self, entity_type: EntityTypeId) -> Option<CategoryId> {
        self.get(entity_type).map(|info| info.category)
    }

    /// Rule word an entity type stands for, if it is a word-block.
    #[must_use]
    pub fn word(&self, entity_type: EntityTypeId) -> Option<RuleWord> {
        self.get(entity_type).and_then(|info| info.word)
    }

    /// True if the entity type is the given connector word.
    #[must_use]
    pub fn is_keyword(&self, entity_type: EntityTypeId, keyword: Keyword) -> bool {
        self.word(entity_type).is_some_and(|word| word.is_keyword(keyword))
    }

    /// Inherent attributes per category.
    #[must_use]
    pub fn inherent(&self) -> &[(CategoryId, AttributeSet)] {
        &self.inherent
    }
}
