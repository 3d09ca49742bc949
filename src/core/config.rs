//! Configuration types consumed read-only by the engine.
//!
//! A loader outside the engine supplies:
//! - `EntityTypeDescriptor`: every placeable entity type, its category, and
//!   the rule word it stands for when it is a word-block
//! - `EntityCategoryDescriptor`: categories and their inherent attributes
//! - `MapDescriptor`: grid size plus the blocks placed on it
//!
//! The engine reaches these through the [`ConfigPort`] trait, injected at
//! construction. [`ConfigSet`] is the stock implementation and can be built
//! with builder methods or parsed from JSON.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::direction::{Direction, Position};
use super::error::{EngineError, Result};

/// Entity type identifier (Baba, Rock, the word "ROCK", ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityTypeId(pub u32);

impl EntityTypeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityType({})", self.0)
    }
}

/// Entity category identifier. Games define what categories exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub u16);

impl CategoryId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

/// Map (level layout) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapId(pub u32);

impl MapId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Map({})", self.0)
    }
}

/// Behavioral capability granted to an entity type or a whole category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeCategory {
    You,
    Win,
    Defeat,
    Push,
    Pull,
    Stop,
    Move,
    Sink,
    Hot,
    Melt,
}

impl AttributeCategory {
    pub const ALL: [AttributeCategory; 10] = [
        AttributeCategory::You,
        AttributeCategory::Win,
        AttributeCategory::Defeat,
        AttributeCategory::Push,
        AttributeCategory::Pull,
        AttributeCategory::Stop,
        AttributeCategory::Move,
        AttributeCategory::Sink,
        AttributeCategory::Hot,
        AttributeCategory::Melt,
    ];

    /// Bit used by `AttributeSet`.
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl std::fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Grammatical connector words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Is,
    And,
}

/// What a word-block means when read as part of a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleWord {
    /// Names an entity type ("BABA").
    EntityType(EntityTypeId),
    /// Names a whole category ("TEXT").
    Category(CategoryId),
    /// Names an attribute ("YOU", "PUSH").
    Attribute(AttributeCategory),
    /// A connector ("IS", "AND").
    Keyword(Keyword),
}

impl RuleWord {
    /// True if this word can stand before "is" as the subject of a sentence.
    #[must_use]
    pub const fn is_subject(self) -> bool {
        matches!(self, RuleWord::EntityType(_) | RuleWord::Category(_))
    }

    /// True if this word can stand after "is" as the complement of a sentence.
    #[must_use]
    pub const fn is_complement(self) -> bool {
        matches!(self, RuleWord::EntityType(_) | RuleWord::Attribute(_))
    }

    #[must_use]
    pub fn is_keyword(self, keyword: Keyword) -> bool {
        self == RuleWord::Keyword(keyword)
    }
}

/// Static description of an entity type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeDescriptor {
    pub id: EntityTypeId,

    /// Human-readable name (for debugging/display).
    #[serde(default)]
    pub name: String,

    pub category: CategoryId,

    /// Meaning as a rule word. `None` for ordinary game objects.
    #[serde(default)]
    pub word: Option<RuleWord>,
}

impl EntityTypeDescriptor {
    pub fn new(id: EntityTypeId, name: impl Into<String>, category: CategoryId) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            word: None,
        }
    }

    /// Mark this entity type as a word-block (builder pattern).
    #[must_use]
    pub fn with_word(mut self, word: RuleWord) -> Self {
        self.word = Some(word);
        self
    }
}

/// Static description of an entity category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCategoryDescriptor {
    pub id: CategoryId,

    #[serde(default)]
    pub name: String,

    /// Attributes every member of the category always has.
    #[serde(default)]
    pub inherent: Vec<AttributeCategory>,
}

impl EntityCategoryDescriptor {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            inherent: Vec::new(),
        }
    }

    /// Add an inherent attribute (builder pattern).
    #[must_use]
    pub fn with_inherent(mut self, attribute: AttributeCategory) -> Self {
        if !self.inherent.contains(&attribute) {
            self.inherent.push(attribute);
        }
        self
    }
}

/// A block placed on a map at game start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub entity_type: EntityTypeId,
    pub position: Position,
    #[serde(default)]
    pub direction: Direction,
}

impl PlacedBlock {
    #[must_use]
    pub fn new(entity_type: EntityTypeId, position: Position) -> Self {
        Self {
            entity_type,
            position,
            direction: Direction::default(),
        }
    }

    /// Set the initial facing (builder pattern).
    #[must_use]
    pub fn facing(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// A level layout: grid size plus placed blocks, in placement order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDescriptor {
    pub id: MapId,

    #[serde(default)]
    pub name: String,

    pub width: u32,
    pub height: u32,

    #[serde(default)]
    pub blocks: Vec<PlacedBlock>,
}

impl MapDescriptor {
    pub fn new(id: MapId, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id,
            name: name.into(),
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Place a block (builder pattern).
    #[must_use]
    pub fn with_block(mut self, block: PlacedBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// True if the position lies on this map.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }
}

/// Read-only lookup port over configuration data.
///
/// The engine never holds global config state; an implementation of this
/// trait is passed to `Game::new` and consulted at game start.
pub trait ConfigPort {
    /// Look up an entity type.
    fn entity_type(&self, id: EntityTypeId) -> Option<&EntityTypeDescriptor>;

    /// Look up an entity category.
    fn category(&self, id: CategoryId) -> Option<&EntityCategoryDescriptor>;

    /// All entity categories, in declaration order.
    fn categories(&self) -> &[EntityCategoryDescriptor];

    /// All entity types, in declaration order.
    fn entity_types(&self) -> &[EntityTypeDescriptor];

    /// Look up a map.
    fn map(&self, id: MapId) -> Option<&MapDescriptor>;

    /// Look up an entity type, failing loudly if it is missing.
    fn require_entity_type(&self, id: EntityTypeId) -> Result<&EntityTypeDescriptor> {
        self.entity_type(id).ok_or(EngineError::UnknownEntityType(id))
    }

    /// Look up a category, failing loudly if it is missing.
    fn require_category(&self, id: CategoryId) -> Result<&EntityCategoryDescriptor> {
        self.category(id).ok_or(EngineError::UnknownCategory(id))
    }

    /// Look up a map, failing loudly if it is missing.
    fn require_map(&self, id: MapId) -> Result<&MapDescriptor> {
        self.map(id).ok_or(EngineError::UnknownMap(id))
    }
}

impl<T: ConfigPort + ?Sized> ConfigPort for &T {
    fn entity_type(&self, id: EntityTypeId) -> Option<&EntityTypeDescriptor> {
        (**self).entity_type(id)
    }

    fn category(&self, id: CategoryId) -> Option<&EntityCategoryDescriptor> {
        (**self).category(id)
    }

    fn categories(&self) -> &[EntityCategoryDescriptor] {
        (**self).categories()
    }

    fn entity_types(&self) -> &[EntityTypeDescriptor] {
        (**self).entity_types()
    }

    fn map(&self, id: MapId) -> Option<&MapDescriptor> {
        (**self).map(id)
    }
}

impl<T: ConfigPort + ?Sized> ConfigPort for Arc<T> {
    fn entity_type(&self, id: EntityTypeId) -> Option<&EntityTypeDescriptor> {
        (**self).entity_type(id)
    }

    fn category(&self, id: CategoryId) -> Option<&EntityCategoryDescriptor> {
        (**self).category(id)
    }

    fn categories(&self) -> &[EntityCategoryDescriptor] {
        (**self).categories()
    }

    fn entity_types(&self) -> &[EntityTypeDescriptor] {
        (**self).entity_types()
    }

    fn map(&self, id: MapId) -> Option<&MapDescriptor> {
        (**self).map(id)
    }
}

/// Serialized shape of a [`ConfigSet`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ConfigData {
    #[serde(default)]
    entity_types: Vec<EntityTypeDescriptor>,
    #[serde(default)]
    categories: Vec<EntityCategoryDescriptor>,
    #[serde(default)]
    maps: Vec<MapDescriptor>,
}

/// Stock [`ConfigPort`] implementation backed by indexed vectors.
///
/// Re-registering an id replaces the earlier descriptor in place.
///
/// ```
/// use rulegrid::core::{
///     AttributeCategory, CategoryId, ConfigPort, ConfigSet, EntityCategoryDescriptor,
///     EntityTypeDescriptor, EntityTypeId,
/// };
///
/// let objects = CategoryId::new(0);
/// let config = ConfigSet::new()
///     .with_category(EntityCategoryDescriptor::new(objects, "Object"))
///     .with_entity_type(EntityTypeDescriptor::new(EntityTypeId::new(1), "Rock", objects));
///
/// assert_eq!(config.entity_type(EntityTypeId::new(1)).unwrap().name, "Rock");
/// assert!(config.entity_type(EntityTypeId::new(2)).is_none());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "ConfigData", into = "ConfigData")]
pub struct ConfigSet {
    entity_types: Vec<EntityTypeDescriptor>,
    categories: Vec<EntityCategoryDescriptor>,
    maps: Vec<MapDescriptor>,
    type_index: FxHashMap<EntityTypeId, usize>,
    category_index: FxHashMap<CategoryId, usize>,
    map_index: FxHashMap<MapId, usize>,
}

impl ConfigSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config set from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this config set to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Register an entity type, replacing any earlier one with the same id.
    pub fn insert_entity_type(&mut self, descriptor: EntityTypeDescriptor) {
        upsert(&mut self.entity_types, &mut self.type_index, descriptor.id, descriptor);
    }

    /// Register a category, replacing any earlier one with the same id.
    pub fn insert_category(&mut self, descriptor: EntityCategoryDescriptor) {
        upsert(&mut self.categories, &mut self.category_index, descriptor.id, descriptor);
    }

    /// Register a map, replacing any earlier one with the same id.
    pub fn insert_map(&mut self, descriptor: MapDescriptor) {
        upsert(&mut self.maps, &mut self.map_index, descriptor.id, descriptor);
    }

    #[must_use]
    pub fn with_entity_type(mut self, descriptor: EntityTypeDescriptor) -> Self {
        self.insert_entity_type(descriptor);
        self
    }

    #[must_use]
    pub fn with_category(mut self, descriptor: EntityCategoryDescriptor) -> Self {
        self.insert_category(descriptor);
        self
    }

    #[must_use]
    pub fn with_map(mut self, descriptor: MapDescriptor) -> Self {
        self.insert_map(descriptor);
        self
    }

    /// All maps, in declaration order.
    #[must_use]
    pub fn maps(&self) -> &[MapDescriptor] {
        &self.maps
    }
}

fn upsert<K, V>(items: &mut Vec<V>, index: &mut FxHashMap<K, usize>, key: K, value: V)
where
    K: std::hash::Hash + Eq,
{
    if let Some(&slot) = index.get(&key) {
        items[slot] = value;
    } else {
        index.insert(key, items.len());
        items.push(value);
    }
}

impl From<ConfigData> for ConfigSet {
    fn from(data: ConfigData) -> Self {
        let mut set = ConfigSet::new();
        for descriptor in data.entity_types {
            set.insert_entity_type(descriptor);
        }
        for descriptor in data.categories {
            set.insert_category(descriptor);
        }
        for descriptor in data.maps {
            set.insert_map(descriptor);
        }
        set
    }
}

impl From<ConfigSet> for ConfigData {
    fn from(set: ConfigSet) -> Self {
        Self {
            entity_types: set.entity_types,
            categories: set.categories,
            maps: set.maps,
        }
    }
}

impl ConfigPort for ConfigSet {
    fn entity_type(&self, id: EntityTypeId) -> Option<&EntityTypeDescriptor> {
        self.type_index.get(&id).map(|&slot| &self.entity_types[slot])
    }

    fn category(&self, id: CategoryId) -> Option<&EntityCategoryDescriptor> {
        self.category_index.get(&id).map(|&slot| &self.categories[slot])
    }

    fn categories(&self) -> &[EntityCategoryDescriptor] {
        &self.categories
    }

    fn entity_types(&self) -> &[EntityTypeDescriptor] {
        &self.entity_types
    }

    fn map(&self, id: MapId) -> Option<&MapDescriptor> {
        self.map_index.get(&id).map(|&slot| &self.maps[slot])
    }
}
