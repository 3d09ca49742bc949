//! Fluent level construction for tests, docs and benchmarks.

use crate::core::{
    ConfigSet, Direction, EntityTypeId, MapDescriptor, MapId, PlacedBlock, Position, Result,
};
use crate::grid::{Catalog, Grid};

use super::classic;

/// Builds one map over a vocabulary, `classic` unless replaced.
///
/// Blocks keep their placement order, which is also their id order and
/// their order within a shared cell.
///
/// ```
/// use rulegrid::levels::{classic, LevelBuilder};
///
/// let (grid, _catalog) = LevelBuilder::new(3, 2)
///     .row(0, &[classic::ROCK_WORD, classic::IS, classic::PUSH])
///     .place(classic::ROCK, 1, 1)
///     .build_grid()
///     .unwrap();
/// assert_eq!(grid.placed_count(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct LevelBuilder {
    config: ConfigSet,
    map: MapDescriptor,
}

impl LevelBuilder {
    /// Id given to the built map unless overridden with [`LevelBuilder::id`].
    pub const DEFAULT_MAP: MapId = MapId::new(1);

    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            config: classic::config(),
            map: MapDescriptor::new(Self::DEFAULT_MAP, "level", width, height),
        }
    }

    /// Replace the vocabulary.
    #[must_use]
    pub fn with_config(mut self, config: ConfigSet) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn id(mut self, id: MapId) -> Self {
        self.map.id = id;
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.map.name = name.into();
        self
    }

    /// Place blocks left to right along row `y`, starting at `x = 0`.
    #[must_use]
    pub fn row(mut self, y: i32, types: &[EntityTypeId]) -> Self {
        for (x, &entity_type) in (0..).zip(types) {
            self = self.place(entity_type, x, y);
        }
        self
    }

    /// Place blocks top to bottom along column `x`, starting at `y = 0`.
    #[must_use]
    pub fn column(mut self, x: i32, types: &[EntityTypeId]) -> Self {
        for (y, &entity_type) in (0..).zip(types) {
            self = self.place(entity_type, x, y);
        }
        self
    }

    /// Place one block with the default facing.
    #[must_use]
    pub fn place(mut self, entity_type: EntityTypeId, x: i32, y: i32) -> Self {
        self.map
            .blocks
            .push(PlacedBlock::new(entity_type, Position::new(x, y)));
        self
    }

    #[must_use]
    pub fn place_facing(mut self, entity_type: EntityTypeId, x: i32, y: i32, direction: Direction) -> Self {
        self.map
            .blocks
            .push(PlacedBlock::new(entity_type, Position::new(x, y)).facing(direction));
        self
    }

    #[must_use]
    pub fn map(&self) -> &MapDescriptor {
        &self.map
    }

    /// Register the map in the vocabulary and hand both out, ready for
    /// `Game::new` and `Game::start_game`.
    #[must_use]
    pub fn build(self) -> (ConfigSet, MapId) {
        let id = self.map.id;
        (self.config.with_map(self.map), id)
    }

    /// Validate and lay out the map directly, without a `Game`.
    pub fn build_grid(self) -> Result<(Grid, Catalog)> {
        let catalog = Catalog::build(&self.config)?;
        catalog.validate_map(&self.map)?;

        let mut grid = Grid::new(self.map.width, self.map.height);
        for placed in &self.map.blocks {
            grid.spawn(placed.entity_type, placed.position, placed.direction)?;
        }
        Ok((grid, catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfigPort, EngineError};
    use crate::grid::BlockId;

    #[test]
    fn test_row_and_column() {
        let (grid, _) = LevelBuilder::new(3, 3)
            .row(0, &[classic::BABA_WORD, classic::IS, classic::YOU])
            .column(2, &[classic::WIN, classic::FLAG_WORD])
            .build_grid()
            .unwrap();

        assert_eq!(grid.cell(Position::new(2, 0)), &[BlockId::new(2), BlockId::new(3)]);
        assert_eq!(grid.cell(Position::new(2, 1)), &[BlockId::new(4)]);
        assert_eq!(grid.block(BlockId::new(1)).unwrap().entity_type, classic::IS);
    }

    #[test]
    fn test_place_facing() {
        let (grid, _) = LevelBuilder::new(2, 2)
            .place_facing(classic::KEKE, 1, 1, Direction::Left)
            .build_grid()
            .unwrap();
        assert_eq!(grid.block(BlockId::new(0)).unwrap().direction, Direction::Left);
    }

    #[test]
    fn test_build_registers_map() {
        let (config, map) = LevelBuilder::new(4, 2)
            .id(MapId::new(7))
            .name("first")
            .place(classic::ROCK, 0, 0)
            .build();

        assert_eq!(map, MapId::new(7));
        let descriptor = config.map(map).unwrap();
        assert_eq!(descriptor.name, "first");
        assert_eq!(descriptor.blocks.len(), 1);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let result = LevelBuilder::new(2, 2).place(classic::ROCK, 2, 0).build_grid();
        assert!(matches!(result, Err(EngineError::BlockOutOfBounds { .. })));
    }
}
