//! Reversible grid mutations.
//!
//! Commands are the only way tick resolution changes the grid. Each variant
//! stores the pre-state it needs inline, captured when the command is built,
//! so `undo` never recomputes anything from post-state. The one exception is
//! the slot a block occupied within its cell, which only `perform` can know;
//! `perform` records it so `undo` restores cell order exactly.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, EntityTypeId, GridError, Position};
use crate::game::GameEvent;
use crate::grid::{Block, BlockId, Grid};

/// One reversible mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Move one cell and face the direction of travel.
    Move {
        block: BlockId,
        from: Position,
        to: Position,
        facing_before: Direction,
        facing_after: Direction,
        /// Slot left in the `from` cell, recorded by `perform`.
        slot: usize,
    },
    /// Detach from the grid. Undo re-registers the same block.
    Destroy { block: BlockId, slot: usize },
    /// Change entity type.
    Convert {
        block: BlockId,
        from: EntityTypeId,
        to: EntityTypeId,
    },
    /// Change facing in place (Move bounce).
    Turn {
        block: BlockId,
        from: Direction,
        to: Direction,
    },
}

impl Command {
    /// Move `block` one cell in `direction`.
    #[must_use]
    pub fn step(block: &Block, direction: Direction) -> Self {
        Command::Move {
            block: block.id,
            from: block.position,
            to: block.position + direction.displacement(),
            facing_before: block.direction,
            facing_after: direction,
            slot: 0,
        }
    }

    #[must_use]
    pub fn destroy(block: &Block) -> Self {
        Command::Destroy { block: block.id, slot: 0 }
    }

    #[must_use]
    pub fn convert(block: &Block, to: EntityTypeId) -> Self {
        Command::Convert {
            block: block.id,
            from: block.entity_type,
            to,
        }
    }

    #[must_use]
    pub fn turn(block: &Block, to: Direction) -> Self {
        Command::Turn {
            block: block.id,
            from: block.direction,
            to,
        }
    }

    /// The block this command mutates.
    #[must_use]
    pub const fn block(&self) -> BlockId {
        match *self {
            Command::Move { block, .. }
            | Command::Destroy { block, .. }
            | Command::Convert { block, .. }
            | Command::Turn { block, .. } => block,
        }
    }

    /// Apply the effect and emit the matching event.
    ///
    /// On error the grid is left as it was.
    pub fn perform(&mut self, grid: &mut Grid, events: &mut Vec<GameEvent>) -> Result<(), GridError> {
        match self {
            Command::Move { block, to, facing_after, slot, .. } => {
                *slot = grid.set_position(*block, *to)?;
                grid.set_direction(*block, *facing_after)?;
                events.push(GameEvent::BlockPositionUpdated(snapshot(grid, *block)?));
            }
            Command::Destroy { block, slot } => {
                *slot = grid.remove_block(*block)?;
                events.push(GameEvent::BlockDestroyed(snapshot(grid, *block)?));
            }
            Command::Convert { block, to, .. } => {
                grid.set_entity_type(*block, *to)?;
                events.push(GameEvent::BlockConverted(snapshot(grid, *block)?));
            }
            Command::Turn { block, to, .. } => {
                grid.set_direction(*block, *to)?;
                events.push(GameEvent::BlockTurned(snapshot(grid, *block)?));
            }
        }
        Ok(())
    }

    /// Apply the exact inverse of `perform` and emit the matching event.
    pub fn undo(&self, grid: &mut Grid, events: &mut Vec<GameEvent>) -> Result<(), GridError> {
        match *self {
            Command::Move { block, from, facing_before, slot, .. } => {
                grid.restore_position(block, from, slot)?;
                grid.set_direction(block, facing_before)?;
                events.push(GameEvent::BlockPositionUpdated(snapshot(grid, block)?));
            }
            Command::Destroy { block, slot } => {
                grid.insert_block(block, slot)?;
                events.push(GameEvent::BlockCreated(snapshot(grid, block)?));
            }
            Command::Convert { block, from, .. } => {
                grid.set_entity_type(block, from)?;
                events.push(GameEvent::BlockConverted(snapshot(grid, block)?));
            }
            Command::Turn { block, from, .. } => {
                grid.set_direction(block, from)?;
                events.push(GameEvent::BlockTurned(snapshot(grid, block)?));
            }
        }
        Ok(())
    }
}

fn snapshot(grid: &Grid, block: BlockId) -> Result<Block, GridError> {
    grid.block(block).copied().ok_or(GridError::UnknownBlock(block))
}
