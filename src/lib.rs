//! # rulegrid
//!
//! A turn-based grid puzzle engine whose rules are themselves blocks on the
//! board. Word-blocks lined up as `NOUN IS PROPERTY` or `NOUN IS NOUN` change
//! which entities move, push, win or die, and the player rearranges them.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Entity types, categories, words and maps come from an
//!    injected [`ConfigPort`]. The engine hardcodes only the attribute set and
//!    the two keywords.
//!
//! 2. **Commands All The Way Down**: Every state change is a reversible
//!    [`Command`]. A tick is the list of commands it performed, so undo and
//!    redo reproduce exact grid state, including order within a cell.
//!
//! 3. **Deterministic**: Same map, same operations, same result. Scans are
//!    row-major, rules keep discovery order, and nothing is random.
//!
//! ## Architecture
//!
//! - **Rules are derived, never stored**: after any change the active rule
//!   set is recomputed from word adjacency on the grid.
//!
//! - **Line-based movement**: push, pull and stop chains are resolved per row
//!   or column in one shared pass, so no block moves twice in a phase.
//!
//! - **Persistent Data Structures**: the history uses `im-rs`, so a whole
//!   [`Game`] clones cheaply for solver-style callers.
//!
//! ## Modules
//!
//! - `core`: Directions, operations, configuration, errors
//! - `grid`: Blocks, the cell registry and the validated type catalog
//! - `attributes`: Attribute sets and per-type/per-category lookup
//! - `rules`: Rule derivation from word adjacency
//! - `commands`: Reversible commands and undo/redo history
//! - `movement`: Movement phases, interactions and the win check
//! - `game`: The orchestrator and its events
//! - `levels`: Sample vocabulary and a level builder
//!
//! ## Usage
//!
//! ```
//! use rulegrid::{Game, GameResult, OperationType};
//! use rulegrid::levels::{classic, LevelBuilder};
//!
//! let (config, map) = LevelBuilder::new(5, 3)
//!     .row(0, &[classic::BABA_WORD, classic::IS, classic::YOU])
//!     .row(1, &[classic::FLAG_WORD, classic::IS, classic::WIN])
//!     .place(classic::BABA, 0, 2)
//!     .place(classic::FLAG, 2, 2)
//!     .build();
//!
//! let mut game = Game::new(config);
//! game.start_game(map).unwrap();
//! game.tick(OperationType::Right).unwrap();
//! let report = game.tick(OperationType::Right).unwrap();
//! assert_eq!(report.result, GameResult::Success);
//! ```

pub mod core;
pub mod grid;
pub mod attributes;
pub mod rules;
pub mod commands;
pub mod movement;
pub mod game;
pub mod levels;

// Re-export commonly used types
pub use crate::core::{
    AttributeCategory, Axis, CategoryId, ConfigPort, ConfigSet, Direction, Displacement,
    EngineError, EntityCategoryDescriptor, EntityTypeDescriptor, EntityTypeId, GridError,
    Keyword, MapDescriptor, MapId, OperationType, PlacedBlock, Position, Result, RuleWord,
};

pub use crate::grid::{Block, BlockId, Catalog, Grid};

pub use crate::attributes::{AttributeSet, AttributeTable};

pub use crate::rules::{Rule, RuleAnalyzer, RuleSet};

pub use crate::commands::{Command, History, Tick};

pub use crate::movement::{GameResult, MovementResolver};

pub use crate::game::{Game, GameEvent, GameStatus, TickReport};
