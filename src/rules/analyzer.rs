//! Rule derivation from word-block adjacency.
//!
//! Every "IS" block anchors sentences along two reading axes, left-to-right
//! and top-to-bottom. From the anchor the analyzer walks:
//!
//! - backward, collecting subject words (entity-type and category words)
//! - forward, collecting complement words (entity-type and attribute words)
//!
//! Each walk is an explicit two-phase loop: collect every matching word in
//! the current cell (stop if there are none), step, then require an "AND"
//! block in that cell (stop if there is none), step again. Every backward
//! match pairs with every forward match to form one rule.
//!
//! All horizontal sentences are collected before vertical ones, and anchors
//! are visited in row-major order, so the rule order is deterministic.

use smallvec::SmallVec;
use tracing::trace;

use crate::commands::Command;
use crate::core::{Direction, Keyword, Position, RuleWord};
use crate::grid::{Catalog, Grid};

use super::rule::{Rule, RuleSet};

/// Reading directions, in the order sentences are collected.
const READING_DIRECTIONS: [Direction; 2] = [Direction::Right, Direction::Down];

type WordRun = SmallVec<[RuleWord; 4]>;

/// Derives the rule set from a grid.
///
/// Holds scratch buffers only; `derive` output depends on nothing but its
/// arguments, so two calls on an unchanged grid return equal rule sets.
///
/// ## Usage
///
/// ```
/// use rulegrid::levels::{classic, LevelBuilder};
/// use rulegrid::rules::{Rule, RuleAnalyzer};
/// use rulegrid::core::AttributeCategory;
///
/// let level = LevelBuilder::new(3, 1).row(0, &[classic::BABA_WORD, classic::IS, classic::YOU]);
/// let (grid, catalog) = level.build_grid().unwrap();
///
/// let rules = RuleAnalyzer::new().derive(&grid, &catalog);
/// assert!(rules.contains(&Rule::TypeHasAttribute {
///     subject: classic::BABA,
///     attribute: AttributeCategory::You,
/// }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleAnalyzer {
    anchors: Vec<Position>,
    backward: WordRun,
    forward: WordRun,
}

impl RuleAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the grid and return every rule it currently spells.
    pub fn derive(&mut self, grid: &Grid, catalog: &Catalog) -> RuleSet {
        self.anchors.clear();
        for block in grid.placed_blocks() {
            if catalog.is_keyword(block.entity_type, Keyword::Is) {
                self.anchors.push(block.position);
            }
        }

        let mut rules = RuleSet::new();
        for direction in READING_DIRECTIONS {
            for index in 0..self.anchors.len() {
                let anchor = self.anchors[index];

                self.backward.clear();
                self.forward.clear();
                collect_run(grid, catalog, anchor, direction.opposite(), RuleWord::is_subject, &mut self.backward);
                collect_run(grid, catalog, anchor, direction, RuleWord::is_complement, &mut self.forward);

                for &subject in &self.backward {
                    for &complement in &self.forward {
                        if let Some(rule) = Rule::from_words(subject, complement) {
                            if rules.insert(rule) {
                                trace!(%rule, %anchor, %direction, "derived rule");
                            }
                        }
                    }
                }
            }
        }
        rules
    }
}

/// Walk from `origin` in `direction`, appending every accepted word found.
fn collect_run(
    grid: &Grid,
    catalog: &Catalog,
    origin: Position,
    direction: Direction,
    accepts: fn(RuleWord) -> bool,
    out: &mut WordRun,
) {
    let step = direction.displacement();
    let mut position = origin + step;

    while grid.in_bounds(position) {
        let before = out.len();
        for &id in grid.cell(position) {
            let word = grid
                .block(id)
                .and_then(|block| catalog.word(block.entity_type))
                .filter(|&word| accepts(word));
            if let Some(word) = word {
                out.push(word);
            }
        }
        if out.len() == before {
            break;
        }

        position += step;

        let bridged = grid.cell(position).iter().any(|&id| {
            grid.block(id)
                .is_some_and(|block| catalog.is_keyword(block.entity_type, Keyword::And))
        });
        if !bridged {
            break;
        }

        position += step;
    }
}

/// Conversion commands the current action rules call for.
///
/// Action rules apply one after another in discovery order, each matching a
/// block's type as left by the earlier ones. Only the net change is emitted:
/// one command per block whose final type differs, in row-major order. A
/// chain collapses into a single conversion and a cycle emits nothing.
#[must_use]
pub fn conversions(rules: &RuleSet, grid: &Grid, catalog: &Catalog) -> Vec<Command> {
    if rules.actions().next().is_none() {
        return Vec::new();
    }

    grid.placed_blocks()
        .filter_map(|block| {
            let target = rules.converted_type(block.entity_type, |entity_type| catalog.category(entity_type));
            (target != block.entity_type).then(|| Command::convert(block, target))
        })
        .collect()
}
