//! Game orchestration: lifecycle, the tick pipeline, undo/redo and events.

pub mod engine;
pub mod events;

pub use engine::{Game, GameStatus, TickReport};
pub use events::GameEvent;
