//! Grid registry for block locations and movement.
//!
//! The `Grid` owns every block of a game and tracks which cell each placed
//! block is registered in. It supports:
//! - Appending a block to the cell matching its stored position
//! - Removing a block from its cell (destruction) without forgetting it
//! - Repositioning a block while preserving its identity
//! - Row-major iteration over cells and placed blocks
//!
//! ## Invariant
//!
//! A placed block is registered in exactly one cell, and that cell is the
//! one at `block.position`. Every mutator preserves this or reports a
//! [`GridError`] and leaves the grid unchanged.

use smallvec::SmallVec;

use crate::core::{Direction, EntityTypeId, GridError, Position};

use super::block::{Block, BlockId};

/// Blocks registered in one cell, in arrival order.
pub type Cell = SmallVec<[BlockId; 4]>;

/// Cell → block registry.
///
/// ## Usage
///
/// ```
/// use rulegrid::grid::Grid;
/// use rulegrid::core::{Direction, EntityTypeId, Position};
///
/// let mut grid = Grid::new(3, 1);
/// let rock = grid.spawn(EntityTypeId::new(1), Position::new(0, 0), Direction::Right).unwrap();
///
/// grid.set_position(rock, Position::new(1, 0)).unwrap();
/// assert!(grid.cell(Position::new(0, 0)).is_empty());
/// assert_eq!(grid.cell(Position::new(1, 0)), &[rock]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,

    /// Row-major cells.
    cells: Vec<Cell>,

    /// Block arena indexed by `BlockId`. Destroyed blocks stay here so undo
    /// can re-register them with the same identity.
    blocks: Vec<Block>,
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let cell_count = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::new(); cell_count],
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True if the position lies on the grid.
    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        self.index_of(position).is_some()
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        let (x, y) = (position.x as u32, position.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Allocate a new block and register it at `position`.
    pub fn spawn(
        &mut self,
        entity_type: EntityTypeId,
        position: Position,
        direction: Direction,
    ) -> Result<BlockId, GridError> {
        let id = BlockId::new(self.blocks.len() as u32);
        if !self.in_bounds(position) {
            return Err(GridError::OutOfBounds { block: id, position });
        }
        self.blocks.push(Block::new(id, entity_type, position, direction));
        self.add_block(id)?;
        Ok(id)
    }

    /// Get a block by id, placed or not.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut Block, GridError> {
        self.blocks.get_mut(id.index()).ok_or(GridError::UnknownBlock(id))
    }

    /// Append a block to the cell at its stored position.
    pub fn add_block(&mut self, id: BlockId) -> Result<(), GridError> {
        let position = self.block(id).ok_or(GridError::UnknownBlock(id))?.position;
        let index = self
            .index_of(position)
            .ok_or(GridError::OutOfBounds { block: id, position })?;
        self.cells[index].push(id);
        Ok(())
    }

    /// Insert a block into the cell at its stored position at `slot`.
    ///
    /// A slot past the end appends.
    pub fn insert_block(&mut self, id: BlockId, slot: usize) -> Result<(), GridError> {
        let position = self.block(id).ok_or(GridError::UnknownBlock(id))?.position;
        let index = self
            .index_of(position)
            .ok_or(GridError::OutOfBounds { block: id, position })?;
        let cell = &mut self.cells[index];
        cell.insert(slot.min(cell.len()), id);
        Ok(())
    }

    /// Remove the first reference to a block from the cell at its stored position.
    ///
    /// Returns the slot the block occupied. If the block is not registered
    /// there, nothing changes and `GridError::BlockNotInCell` reports the
    /// desynchronized bookkeeping.
    pub fn remove_block(&mut self, id: BlockId) -> Result<usize, GridError> {
        let position = self.block(id).ok_or(GridError::UnknownBlock(id))?.position;
        let cell = self
            .index_of(position)
            .map(|index| &mut self.cells[index])
            .ok_or(GridError::BlockNotInCell { block: id, position })?;
        let slot = cell
            .iter()
            .position(|&b| b == id)
            .ok_or(GridError::BlockNotInCell { block: id, position })?;
        cell.remove(slot);
        Ok(slot)
    }

    /// Move a block to a new cell, preserving its identity.
    ///
    /// The block is removed from its current cell, its position updated, and
    /// it is appended to the new cell. Returns the slot it left. Fails
    /// without changes if the target is off-grid or the block is not
    /// registered where it claims to be.
    pub fn set_position(&mut self, id: BlockId, position: Position) -> Result<usize, GridError> {
        if !self.in_bounds(position) {
            return Err(GridError::OutOfBounds { block: id, position });
        }
        let slot = self.remove_block(id)?;
        self.block_mut(id)?.position = position;
        self.add_block(id)?;
        Ok(slot)
    }

    /// Move a block back to `position`, inserting it at `slot` of that cell.
    ///
    /// Inverse of `set_position` when replayed in reverse order.
    pub fn restore_position(&mut self, id: BlockId, position: Position, slot: usize) -> Result<(), GridError> {
        if !self.in_bounds(position) {
            return Err(GridError::OutOfBounds { block: id, position });
        }
        self.remove_block(id)?;
        self.block_mut(id)?.position = position;
        self.insert_block(id, slot)
    }

    /// Change a block's entity type.
    pub fn set_entity_type(&mut self, id: BlockId, entity_type: EntityTypeId) -> Result<(), GridError> {
        self.block_mut(id)?.entity_type = entity_type;
        Ok(())
    }

    /// Change a block's facing.
    pub fn set_direction(&mut self, id: BlockId, direction: Direction) -> Result<(), GridError> {
        self.block_mut(id)?.direction = direction;
        Ok(())
    }

    /// Blocks registered at a position, in arrival order.
    ///
    /// Off-grid positions yield an empty slice.
    #[must_use]
    pub fn cell(&self, position: Position) -> &[BlockId] {
        self.index_of(position).map_or(&[], |index| self.cells[index].as_slice())
    }

    /// True if the block is currently registered in its cell.
    #[must_use]
    pub fn is_placed(&self, id: BlockId) -> bool {
        self.block(id)
            .is_some_and(|block| self.cell(block.position).contains(&id))
    }

    /// All grid positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Every placed block, row-major by cell and in arrival order within a cell.
    pub fn placed_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.cells
            .iter()
            .flat_map(|cell| cell.iter())
            .map(move |&id| &self.blocks[id.index()])
    }

    /// Every block ever allocated, placed or destroyed, by id.
    #[must_use]
    pub fn all_blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of placed blocks.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.len()).sum()
    }
}
