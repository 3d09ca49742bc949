//! Engine error types.
//!
//! Two families of failure exist:
//!
//! - [`EngineError`]: boundary failures. Unknown ids in config or map data
//!   are fatal and reported before any game state is built. Lifecycle misuse
//!   (ticking a game that is not running) is rejected before a tick starts.
//! - [`GridError`]: state-invariant violations detected while mutating the
//!   grid. These never abort a tick; the orchestrator logs and records them.

use thiserror::Error;

use super::config::{CategoryId, EntityTypeId, MapId};
use super::direction::Position;
use crate::grid::BlockId;

/// Grid bookkeeping violations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// A block was expected in the cell matching its stored position but was not there.
    #[error("{block} is not registered in cell {position}")]
    BlockNotInCell { block: BlockId, position: Position },

    /// A block was placed outside the grid.
    #[error("{block} position {position} is outside the grid")]
    OutOfBounds { block: BlockId, position: Position },

    /// A block id that was never allocated.
    #[error("unknown block {0}")]
    UnknownBlock(BlockId),
}

/// Errors surfaced at the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown entity type: {0}")]
    UnknownEntityType(EntityTypeId),

    #[error("unknown entity category: {0}")]
    UnknownCategory(CategoryId),

    #[error("unknown map: {0}")]
    UnknownMap(MapId),

    #[error("map {map} places a block at {position} outside its {width}x{height} grid")]
    BlockOutOfBounds {
        map: MapId,
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("map {0} has an empty grid")]
    EmptyMap(MapId),

    #[error("map {map} is {width}x{height}, wider or taller than a grid coordinate can reach")]
    MapTooLarge { map: MapId, width: u32, height: u32 },

    #[error("no game is running")]
    NotRunning,

    #[error("no map has been started")]
    NoMapLoaded,

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::UnknownEntityType(EntityTypeId::new(7));
        assert_eq!(err.to_string(), "unknown entity type: EntityType(7)");

        let err = GridError::BlockNotInCell {
            block: BlockId::new(3),
            position: Position::new(1, 2),
        };
        assert_eq!(err.to_string(), "Block(3) is not registered in cell (1, 2)");
    }

    #[test]
    fn test_grid_error_converts() {
        let err: EngineError = GridError::UnknownBlock(BlockId::new(9)).into();
        assert!(matches!(err, EngineError::Grid(GridError::UnknownBlock(_))));
    }
}
