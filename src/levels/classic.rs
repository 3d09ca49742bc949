//! Standard vocabulary: a handful of objects, their noun words, the two
//! keywords and one word per attribute.
//!
//! Every word-block belongs to the `TEXT` category, which is inherently Push.

use crate::core::{
    AttributeCategory, CategoryId, ConfigSet, EntityCategoryDescriptor, EntityTypeDescriptor,
    EntityTypeId, Keyword, RuleWord,
};

pub const OBJECTS: CategoryId = CategoryId::new(0);
pub const TEXT: CategoryId = CategoryId::new(1);

// Objects
pub const BABA: EntityTypeId = EntityTypeId::new(1);
pub const ROCK: EntityTypeId = EntityTypeId::new(2);
pub const WALL: EntityTypeId = EntityTypeId::new(3);
pub const FLAG: EntityTypeId = EntityTypeId::new(4);
pub const WATER: EntityTypeId = EntityTypeId::new(5);
pub const SKULL: EntityTypeId = EntityTypeId::new(6);
pub const LAVA: EntityTypeId = EntityTypeId::new(7);
pub const KEKE: EntityTypeId = EntityTypeId::new(8);

// Nouns
pub const BABA_WORD: EntityTypeId = EntityTypeId::new(101);
pub const ROCK_WORD: EntityTypeId = EntityTypeId::new(102);
pub const WALL_WORD: EntityTypeId = EntityTypeId::new(103);
pub const FLAG_WORD: EntityTypeId = EntityTypeId::new(104);
pub const WATER_WORD: EntityTypeId = EntityTypeId::new(105);
pub const SKULL_WORD: EntityTypeId = EntityTypeId::new(106);
pub const LAVA_WORD: EntityTypeId = EntityTypeId::new(107);
pub const KEKE_WORD: EntityTypeId = EntityTypeId::new(108);
/// Names the `TEXT` category itself.
pub const TEXT_WORD: EntityTypeId = EntityTypeId::new(109);

// Keywords
pub const IS: EntityTypeId = EntityTypeId::new(201);
pub const AND: EntityTypeId = EntityTypeId::new(202);

// Attributes
pub const YOU: EntityTypeId = EntityTypeId::new(301);
pub const WIN: EntityTypeId = EntityTypeId::new(302);
pub const DEFEAT: EntityTypeId = EntityTypeId::new(303);
pub const PUSH: EntityTypeId = EntityTypeId::new(304);
pub const PULL: EntityTypeId = EntityTypeId::new(305);
pub const STOP: EntityTypeId = EntityTypeId::new(306);
pub const MOVE: EntityTypeId = EntityTypeId::new(307);
pub const SINK: EntityTypeId = EntityTypeId::new(308);
pub const HOT: EntityTypeId = EntityTypeId::new(309);
pub const MELT: EntityTypeId = EntityTypeId::new(310);

const OBJECT_NAMES: [(EntityTypeId, EntityTypeId, &str); 8] = [
    (BABA, BABA_WORD, "Baba"),
    (ROCK, ROCK_WORD, "Rock"),
    (WALL, WALL_WORD, "Wall"),
    (FLAG, FLAG_WORD, "Flag"),
    (WATER, WATER_WORD, "Water"),
    (SKULL, SKULL_WORD, "Skull"),
    (LAVA, LAVA_WORD, "Lava"),
    (KEKE, KEKE_WORD, "Keke"),
];

const ATTRIBUTE_WORDS: [(EntityTypeId, AttributeCategory); 10] = [
    (YOU, AttributeCategory::You),
    (WIN, AttributeCategory::Win),
    (DEFEAT, AttributeCategory::Defeat),
    (PUSH, AttributeCategory::Push),
    (PULL, AttributeCategory::Pull),
    (STOP, AttributeCategory::Stop),
    (MOVE, AttributeCategory::Move),
    (SINK, AttributeCategory::Sink),
    (HOT, AttributeCategory::Hot),
    (MELT, AttributeCategory::Melt),
];

/// A config holding the whole vocabulary and no maps.
#[must_use]
pub fn config() -> ConfigSet {
    let mut config = ConfigSet::new()
        .with_category(EntityCategoryDescriptor::new(OBJECTS, "Object"))
        .with_category(
            EntityCategoryDescriptor::new(TEXT, "Text").with_inherent(AttributeCategory::Push),
        );

    for (object, word, name) in OBJECT_NAMES {
        config.insert_entity_type(EntityTypeDescriptor::new(object, name, OBJECTS));
        config.insert_entity_type(
            EntityTypeDescriptor::new(word, name.to_uppercase(), TEXT)
                .with_word(RuleWord::EntityType(object)),
        );
    }

    config.insert_entity_type(
        EntityTypeDescriptor::new(TEXT_WORD, "TEXT", TEXT).with_word(RuleWord::Category(TEXT)),
    );
    config.insert_entity_type(
        EntityTypeDescriptor::new(IS, "IS", TEXT).with_word(RuleWord::Keyword(Keyword::Is)),
    );
    config.insert_entity_type(
        EntityTypeDescriptor::new(AND, "AND", TEXT).with_word(RuleWord::Keyword(Keyword::And)),
    );

    for (word, attribute) in ATTRIBUTE_WORDS {
        config.insert_entity_type(
            EntityTypeDescriptor::new(word, attribute.to_string().to_uppercase(), TEXT)
                .with_word(RuleWord::Attribute(attribute)),
        );
    }

    config
}
