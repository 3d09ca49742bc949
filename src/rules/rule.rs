//! Derived rules.
//!
//! A `Rule` is an ephemeral fact read off the grid ("ROCK IS PUSH"). Rules are
//! rebuilt from scratch every tick, undo and redo; nothing about them is
//! persisted between ticks.

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeTable;
use crate::core::{AttributeCategory, CategoryId, EntityTypeId, RuleWord};

/// One derived "X IS Y" sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// "BABA IS YOU"
    TypeHasAttribute {
        subject: EntityTypeId,
        attribute: AttributeCategory,
    },
    /// "TEXT IS PUSH"
    CategoryHasAttribute {
        subject: CategoryId,
        attribute: AttributeCategory,
    },
    /// "ROCK IS FLAG"
    TypeBecomesType {
        subject: EntityTypeId,
        target: EntityTypeId,
    },
    /// "TEXT IS BABA"
    CategoryBecomesType {
        subject: CategoryId,
        target: EntityTypeId,
    },
}

impl Rule {
    /// Build the rule a subject word and complement word spell out.
    ///
    /// Returns `None` if the pair is not a valid sentence.
    #[must_use]
    pub fn from_words(subject: RuleWord, complement: RuleWord) -> Option<Self> {
        match (subject, complement) {
            (RuleWord::EntityType(subject), RuleWord::Attribute(attribute)) => {
                Some(Rule::TypeHasAttribute { subject, attribute })
            }
            (RuleWord::Category(subject), RuleWord::Attribute(attribute)) => {
                Some(Rule::CategoryHasAttribute { subject, attribute })
            }
            (RuleWord::EntityType(subject), RuleWord::EntityType(target)) => {
                Some(Rule::TypeBecomesType { subject, target })
            }
            (RuleWord::Category(subject), RuleWord::EntityType(target)) => {
                Some(Rule::CategoryBecomesType { subject, target })
            }
            _ => None,
        }
    }

    /// True for conversion rules, false for attribute rules.
    #[must_use]
    pub const fn is_action(&self) -> bool {
        matches!(self, Rule::TypeBecomesType { .. } | Rule::CategoryBecomesType { .. })
    }

    /// Grant this rule's attribute. Conversion rules do nothing here.
    pub fn apply_persistent(&self, table: &mut AttributeTable) {
        match *self {
            Rule::TypeHasAttribute { subject, attribute } => table.grant_type(subject, attribute),
            Rule::CategoryHasAttribute { subject, attribute } => {
                table.grant_category(subject, attribute);
            }
            Rule::TypeBecomesType { .. } | Rule::CategoryBecomesType { .. } => {}
        }
    }

    /// Type a block of `entity_type` in `category` should become under this rule.
    #[must_use]
    pub fn conversion_target(
        &self,
        entity_type: EntityTypeId,
        category: Option<CategoryId>,
    ) -> Option<EntityTypeId> {
        match *self {
            Rule::TypeBecomesType { subject, target } if subject == entity_type => Some(target),
            Rule::CategoryBecomesType { subject, target } if Some(subject) == category => Some(target),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::TypeHasAttribute { subject, attribute } => write!(f, "{} is {}", subject, attribute),
            Rule::CategoryHasAttribute { subject, attribute } => write!(f, "{} is {}", subject, attribute),
            Rule::TypeBecomesType { subject, target } => write!(f, "{} is {}", subject, target),
            Rule::CategoryBecomesType { subject, target } => write!(f, "{} is {}", subject, target),
        }
    }
}

/// Rules derived from one grid state, in discovery order, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule unless an equal one is already present.
    ///
    /// Returns true if the rule was new.
    pub fn insert(&mut self, rule: Rule) -> bool {
        if self.rules.contains(&rule) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    #[must_use]
    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Attribute rules, in discovery order.
    pub fn persistent(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| !rule.is_action())
    }

    /// Conversion rules, in discovery order.
    pub fn actions(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.is_action())
    }

    /// Grant every attribute rule to the table.
    pub fn apply_persistent(&self, table: &mut AttributeTable) {
        for rule in self.persistent() {
            rule.apply_persistent(table);
        }
    }

    /// Type a block of `entity_type` ends up as once every conversion rule
    /// has run.
    ///
    /// Rules apply in discovery order, each to the type left by the ones
    /// before it, so "ROCK IS FLAG" then "FLAG IS BABA" turns a rock into a
    /// baba and "ROCK IS FLAG" then "FLAG IS ROCK" leaves it a rock.
    #[must_use]
    pub fn converted_type(
        &self,
        entity_type: EntityTypeId,
        category_of: impl Fn(EntityTypeId) -> Option<CategoryId>,
    ) -> EntityTypeId {
        self.actions().fold(entity_type, |current, rule| {
            rule.conversion_target(current, category_of(current))
                .unwrap_or(current)
        })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BABA: EntityTypeId = EntityTypeId::new(1);
    const ROCK: EntityTypeId = EntityTypeId::new(2);
    const FLAG: EntityTypeId = EntityTypeId::new(3);
    const OBJECTS: CategoryId = CategoryId::new(0);

    #[test]
    fn test_from_words_shapes() {
        assert_eq!(
            Rule::from_words(RuleWord::EntityType(BABA), RuleWord::Attribute(AttributeCategory::You)),
            Some(Rule::TypeHasAttribute { subject: BABA, attribute: AttributeCategory::You })
        );
        assert_eq!(
            Rule::from_words(RuleWord::Category(OBJECTS), RuleWord::EntityType(ROCK)),
            Some(Rule::CategoryBecomesType { subject: OBJECTS, target: ROCK })
        );
        assert_eq!(
            Rule::from_words(RuleWord::Attribute(AttributeCategory::You), RuleWord::EntityType(ROCK)),
            None
        );
    }

    #[test]
    fn test_rule_set_deduplicates_in_order() {
        let you = Rule::TypeHasAttribute { subject: BABA, attribute: AttributeCategory::You };
        let rock = Rule::TypeBecomesType { subject: BABA, target: ROCK };

        let mut rules = RuleSet::new();
        assert!(rules.insert(rock));
        assert!(rules.insert(you));
        assert!(!rules.insert(rock));

        assert_eq!(rules.as_slice(), &[rock, you]);
        assert_eq!(rules.persistent().count(), 1);
        assert_eq!(rules.actions().count(), 1);
    }

    #[test]
    fn test_apply_persistent_ignores_actions() {
        let mut rules = RuleSet::new();
        rules.insert(Rule::CategoryHasAttribute { subject: OBJECTS, attribute: AttributeCategory::Stop });
        rules.insert(Rule::TypeBecomesType { subject: BABA, target: ROCK });

        let mut table = AttributeTable::new();
        rules.apply_persistent(&mut table);

        assert!(table.has_attribute(ROCK, Some(OBJECTS), AttributeCategory::Stop));
        assert_eq!(table.resolve(BABA, None), crate::attributes::AttributeSet::empty());
    }

    fn category_of(entity_type: EntityTypeId) -> Option<CategoryId> {
        (entity_type == BABA || entity_type == ROCK).then_some(OBJECTS)
    }

    #[test]
    fn test_conversions_chain_in_discovery_order() {
        let mut rules = RuleSet::new();
        rules.insert(Rule::TypeBecomesType { subject: ROCK, target: FLAG });
        rules.insert(Rule::TypeBecomesType { subject: FLAG, target: BABA });
        assert_eq!(rules.converted_type(ROCK, category_of), BABA);
        assert_eq!(rules.converted_type(FLAG, category_of), BABA);

        let mut reversed = RuleSet::new();
        reversed.insert(Rule::TypeBecomesType { subject: FLAG, target: BABA });
        reversed.insert(Rule::TypeBecomesType { subject: ROCK, target: FLAG });
        assert_eq!(reversed.converted_type(ROCK, category_of), FLAG);
    }

    #[test]
    fn test_conversion_cycle_nets_out() {
        let mut rules = RuleSet::new();
        rules.insert(Rule::TypeBecomesType { subject: ROCK, target: FLAG });
        rules.insert(Rule::TypeBecomesType { subject: FLAG, target: ROCK });
        assert_eq!(rules.converted_type(ROCK, category_of), ROCK);
        assert_eq!(rules.converted_type(FLAG, category_of), ROCK);
    }

    #[test]
    fn test_category_conversion_uses_live_category() {
        let mut rules = RuleSet::new();
        rules.insert(Rule::TypeBecomesType { subject: FLAG, target: ROCK });
        rules.insert(Rule::CategoryBecomesType { subject: OBJECTS, target: BABA });
        assert_eq!(rules.converted_type(FLAG, category_of), BABA);
        assert_eq!(rules.converted_type(EntityTypeId::new(9), category_of), EntityTypeId::new(9));
    }
}
