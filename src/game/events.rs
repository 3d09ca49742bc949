//! Events emitted for presentation collaborators.
//!
//! Events are buffered inside the `Game` and drained with
//! `Game::take_events`. Block events carry a copy of the block's state right
//! after the change.

use serde::{Deserialize, Serialize};

use crate::grid::Block;

/// Lifecycle and state-change notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A map was loaded and its blocks created.
    GameStarted,
    /// The win check produced an outcome.
    GameEnded { success: bool },
    /// The running game was torn down.
    GameStopped,
    /// A block was placed on the grid (at start, or by undoing a destruction).
    BlockCreated(Block),
    /// A block changed cell.
    BlockPositionUpdated(Block),
    /// A block was removed from the grid.
    BlockDestroyed(Block),
    /// A block changed entity type.
    BlockConverted(Block),
    /// A block changed facing without moving.
    BlockTurned(Block),
}

impl GameEvent {
    /// The block this event is about, if any.
    #[must_use]
    pub fn block(&self) -> Option<&Block> {
        match self {
            GameEvent::BlockCreated(block)
            | GameEvent::BlockPositionUpdated(block)
            | GameEvent::BlockDestroyed(block)
            | GameEvent::BlockConverted(block)
            | GameEvent::BlockTurned(block) => Some(block),
            GameEvent::GameStarted | GameEvent::GameEnded { .. } | GameEvent::GameStopped => None,
        }
    }
}
