//! Block instances.
//!
//! A `Block` is one placed instance of an entity type. Its identity
//! (`BlockId`) is stable for the whole game: conversion rules change its
//! entity type, movement changes its position, destruction detaches it from
//! the grid, but the id never changes and is never reused.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, EntityTypeId, Position};

/// Unique identifier for a block within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

impl BlockId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the block arena.
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block({})", self.0)
    }
}

/// Mutable state of one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,

    /// Current entity type. Conversion rules change this.
    pub entity_type: EntityTypeId,

    /// Cell this block is registered in (or was, if destroyed).
    pub position: Position,

    /// Facing, consulted by the Move attribute.
    pub direction: Direction,
}

impl Block {
    #[must_use]
    pub fn new(id: BlockId, entity_type: EntityTypeId, position: Position, direction: Direction) -> Self {
        Self {
            id,
            entity_type,
            position,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id() {
        let id = BlockId::new(4);
        assert_eq!(id.raw(), 4);
        assert_eq!(id.index(), 4);
        assert_eq!(format!("{}", id), "Block(4)");
    }

    #[test]
    fn test_block_serialization() {
        let block = Block::new(BlockId(1), EntityTypeId::new(2), Position::new(3, 4), Direction::Left);
        let json = serde_json::to_string(&block).unwrap();
        let parsed: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, parsed);
    }
}
