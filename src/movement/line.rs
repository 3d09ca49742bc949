//! Push/pull/stop chain resolution along one grid line.
//!
//! Movement on a single axis only ever interacts with blocks in the same row
//! (horizontal moves) or column (vertical moves), so every line is resolved
//! on its own. A line is indexed from its negative end (left or top), and a
//! block's intent is tracked as independent flags per sense:
//!
//! - a mover, or a block it pushes, gets a strong flag
//! - a block it pulls gets a weak "pulled" flag, unless already strong
//!
//! Resolution then runs three passes:
//!
//! 1. Cancel: a block with intents in both senses does not move.
//! 2. Forward settle, from the leading end back: a cell cannot advance if it
//!    is at the edge, or the next cell holds a Stop, Push or Pull block that
//!    is not itself advancing. Pulled blocks also need something in the next
//!    cell to follow.
//! 3. Backward settle, symmetric.
//!
//! Each block ends with at most one move.

use std::ops::Range;

use crate::attributes::{AttributeSet, AttributeTable};
use crate::core::{AttributeCategory, Axis, Direction, Position};
use crate::grid::{Block, Catalog, Grid};

const FORWARD: u8 = 0b0001;
const BACKWARD: u8 = 0b0010;
const PULLED_FORWARD: u8 = 0b0100;
const PULLED_BACKWARD: u8 = 0b1000;

/// Travel sense along a line: towards higher or lower indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sense {
    /// Towards the positive end (right or down).
    Forward,
    /// Towards the negative end (left or up).
    Backward,
}

impl Sense {
    /// Sense of a direction on its own axis.
    #[must_use]
    pub const fn of(direction: Direction) -> Self {
        if direction.is_positive() {
            Sense::Forward
        } else {
            Sense::Backward
        }
    }

    /// Direction this sense points on `axis`.
    #[must_use]
    pub const fn direction(self, axis: Axis) -> Direction {
        match self {
            Sense::Forward => axis.positive(),
            Sense::Backward => axis.negative(),
        }
    }

    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Sense::Forward => Sense::Backward,
            Sense::Backward => Sense::Forward,
        }
    }

    const fn strong(self) -> u8 {
        match self {
            Sense::Forward => FORWARD,
            Sense::Backward => BACKWARD,
        }
    }

    const fn pulled(self) -> u8 {
        match self {
            Sense::Forward => PULLED_FORWARD,
            Sense::Backward => PULLED_BACKWARD,
        }
    }

    const fn any(self) -> u8 {
        self.strong() | self.pulled()
    }
}

/// One block snapshot on the line.
#[derive(Clone, Copy, Debug)]
struct Entry {
    block: Block,
    attributes: AttributeSet,
    flags: u8,
}

impl Entry {
    fn mark_strong(&mut self, sense: Sense) {
        self.flags |= sense.strong();
        self.flags &= !sense.pulled();
    }

    fn mark_pulled(&mut self, sense: Sense) {
        if self.flags & sense.strong() == 0 {
            self.flags |= sense.pulled();
        }
    }

    fn moves(&self, sense: Sense) -> bool {
        self.flags & sense.any() != 0
    }

    fn is_obstacle(&self) -> bool {
        self.attributes.contains(AttributeCategory::Stop)
            || self.attributes.contains(AttributeCategory::Push)
            || self.attributes.contains(AttributeCategory::Pull)
    }
}

/// Resolves simultaneous moves on one line.
///
/// Buffers are reused between lines; `load` clears them.
#[derive(Clone, Debug, Default)]
pub struct LineResolver {
    entries: Vec<Entry>,

    /// `entries[starts[i]..starts[i + 1]]` is cell `i`, in arrival order.
    starts: Vec<usize>,
}

impl LineResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the blocks on `positions` (negative end first) with their attributes.
    pub fn load(
        &mut self,
        grid: &Grid,
        catalog: &Catalog,
        table: &AttributeTable,
        positions: impl IntoIterator<Item = Position>,
    ) {
        self.entries.clear();
        self.starts.clear();
        for position in positions {
            self.starts.push(self.entries.len());
            for &id in grid.cell(position) {
                if let Some(block) = grid.block(id) {
                    self.entries.push(Entry {
                        block: *block,
                        attributes: table.of_block(catalog, block),
                        flags: 0,
                    });
                }
            }
        }
        self.starts.push(self.entries.len());
    }

    /// Number of cells on the line.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.starts.len().saturating_sub(1)
    }

    /// Entry indices of cell `cell`.
    #[must_use]
    pub fn cell(&self, cell: usize) -> Range<usize> {
        self.starts[cell]..self.starts[cell + 1]
    }

    #[must_use]
    pub fn block(&self, entry: usize) -> &Block {
        &self.entries[entry].block
    }

    #[must_use]
    pub fn has(&self, entry: usize, attribute: AttributeCategory) -> bool {
        self.entries[entry].attributes.contains(attribute)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn neighbor(&self, cell: usize, sense: Sense) -> Option<usize> {
        match sense {
            Sense::Forward => (cell + 1 < self.cell_count()).then_some(cell + 1),
            Sense::Backward => cell.checked_sub(1),
        }
    }

    /// Mark a mover in `cell`, the Push chain ahead of it and the Pull chain behind.
    pub fn mark_mover(&mut self, cell: usize, entry: usize, sense: Sense) {
        self.entries[entry].mark_strong(sense);

        let mut current = cell;
        while let Some(next) = self.neighbor(current, sense) {
            if !self.mark_cell(next, AttributeCategory::Push, |entry| entry.mark_strong(sense)) {
                break;
            }
            current = next;
        }

        let mut current = cell;
        while let Some(prev) = self.neighbor(current, sense.reverse()) {
            if !self.mark_cell(prev, AttributeCategory::Pull, |entry| entry.mark_pulled(sense)) {
                break;
            }
            current = prev;
        }
    }

    /// Apply `mark` to every entry in `cell` with `attribute`. Returns true if any matched.
    fn mark_cell(&mut self, cell: usize, attribute: AttributeCategory, mark: impl Fn(&mut Entry)) -> bool {
        let mut found = false;
        for index in self.cell(cell) {
            let entry = &mut self.entries[index];
            if entry.attributes.contains(attribute) {
                mark(entry);
                found = true;
            }
        }
        found
    }

    /// Settle every intent into at most one move per block.
    pub fn resolve(&mut self) {
        for entry in &mut self.entries {
            if entry.moves(Sense::Forward) && entry.moves(Sense::Backward) {
                entry.flags = 0;
            }
        }
        self.settle(Sense::Forward);
        self.settle(Sense::Backward);
    }

    fn settle(&mut self, sense: Sense) {
        let count = self.cell_count();
        for step in 0..count {
            let cell = match sense {
                Sense::Forward => count - 1 - step,
                Sense::Backward => step,
            };

            let (blocked, led) = match self.neighbor(cell, sense) {
                None => (true, false),
                Some(next) => {
                    let range = self.cell(next);
                    let entries = &self.entries[range];
                    let blocked = entries
                        .iter()
                        .any(|entry| entry.is_obstacle() && !entry.moves(sense));
                    let led = entries.iter().any(|entry| entry.moves(sense));
                    (blocked, led)
                }
            };

            for index in self.cell(cell) {
                let entry = &mut self.entries[index];
                if blocked {
                    entry.flags &= !sense.any();
                } else if !led && entry.flags & sense.strong() == 0 {
                    entry.flags &= !sense.pulled();
                }
            }
        }
    }

    /// True if the entry moves in `sense` after resolution.
    #[must_use]
    pub fn moves(&self, entry: usize, sense: Sense) -> bool {
        self.entries[entry].moves(sense)
    }

    /// True if the entry moves at all after resolution.
    #[must_use]
    pub fn is_moving(&self, entry: usize) -> bool {
        self.moves(entry, Sense::Forward) || self.moves(entry, Sense::Backward)
    }

    /// Resolved moves in execution order: forward movers from the leading
    /// end back, then backward movers from the leading end back.
    pub fn collect_moves(&self, out: &mut Vec<(Block, Sense)>) {
        let count = self.cell_count();
        for cell in (0..count).rev() {
            for index in self.cell(cell) {
                if self.moves(index, Sense::Forward) {
                    out.push((self.entries[index].block, Sense::Forward));
                }
            }
        }
        for cell in 0..count {
            for index in self.cell(cell) {
                if self.moves(index, Sense::Backward) {
                    out.push((self.entries[index].block, Sense::Backward));
                }
            }
        }
    }
}
