//! Destructive interactions between blocks sharing a cell.
//!
//! Evaluated once movement has settled, cell by cell in row-major order, in a
//! fixed order per cell:
//!
//! 1. Sink: a Sink block and any non-Sink block destroy everything in the cell.
//! 2. Defeat: a Defeat block destroys every You block in the cell.
//! 3. Hot: a Hot block destroys every Melt block in the cell.
//!
//! Later steps only see blocks earlier steps left alive. Every cell is
//! snapshotted before any command is built, so the grid is never mutated
//! while it is being scanned.

use smallvec::SmallVec;

use crate::attributes::{AttributeSet, AttributeTable};
use crate::commands::Command;
use crate::core::AttributeCategory;
use crate::grid::{Block, Catalog, Grid};

type CellSnapshot = SmallVec<[(Block, AttributeSet); 4]>;

/// Destroy commands for every interaction on the grid.
#[must_use]
pub fn destructions(grid: &Grid, catalog: &Catalog, table: &AttributeTable) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut survivors = CellSnapshot::new();

    for position in grid.positions() {
        let cell = grid.cell(position);
        if cell.is_empty() {
            continue;
        }

        survivors.clear();
        survivors.extend(
            cell.iter()
                .filter_map(|&id| grid.block(id))
                .map(|block| (*block, table.of_block(catalog, block))),
        );

        let has_sink = survivors.iter().any(|(_, set)| set.contains(AttributeCategory::Sink));
        let has_other = survivors.iter().any(|(_, set)| !set.contains(AttributeCategory::Sink));
        if has_sink && has_other {
            commands.extend(survivors.drain(..).map(|(block, _)| Command::destroy(&block)));
            continue;
        }

        destroy_where(&mut survivors, &mut commands, AttributeCategory::Defeat, AttributeCategory::You);
        destroy_where(&mut survivors, &mut commands, AttributeCategory::Hot, AttributeCategory::Melt);
    }

    commands
}

/// If any survivor has `trigger`, destroy every survivor with `victim`.
fn destroy_where(
    survivors: &mut CellSnapshot,
    commands: &mut Vec<Command>,
    trigger: AttributeCategory,
    victim: AttributeCategory,
) {
    if !survivors.iter().any(|(_, set)| set.contains(trigger)) {
        return;
    }
    survivors.retain(|(block, set)| {
        if set.contains(victim) {
            commands.push(Command::destroy(block));
            false
        } else {
            true
        }
    });
}
