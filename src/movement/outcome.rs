//! Win/lose evaluation.

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeSet, AttributeTable};
use crate::core::AttributeCategory;
use crate::grid::{Catalog, Grid};

/// Outcome of the win check after a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Play continues.
    #[default]
    Uncertain,
    /// A cell holds both You and Win.
    Success,
    /// A cell holds both You and Defeat, and no cell succeeds.
    Failure,
}

impl GameResult {
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, GameResult::Uncertain)
    }
}

/// Scan every cell. Success takes priority over failure.
#[must_use]
pub fn evaluate(grid: &Grid, catalog: &Catalog, table: &AttributeTable) -> GameResult {
    let mut result = GameResult::Uncertain;

    for position in grid.positions() {
        let attributes: AttributeSet = grid
            .cell(position)
            .iter()
            .filter_map(|&id| grid.block(id))
            .map(|block| table.of_block(catalog, block))
            .fold(AttributeSet::empty(), AttributeSet::union);

        if !attributes.contains(AttributeCategory::You) {
            continue;
        }
        if attributes.contains(AttributeCategory::Win) {
            return GameResult::Success;
        }
        if attributes.contains(AttributeCategory::Defeat) {
            result = GameResult::Failure;
        }
    }

    result
}
