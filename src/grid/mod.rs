//! Grid system: blocks, the cell registry, and validated type lookup.
//!
//! ## Key Types
//!
//! - `BlockId`: Stable identity of one placed block
//! - `Block`: Mutable block state (entity type, position, facing)
//! - `Grid`: Cell → block registry owning every block of a game
//! - `Catalog`: Config facts validated once at game start

pub mod block;
pub mod catalog;
pub mod cells;

pub use block::{Block, BlockId};
pub use catalog::{Catalog, TypeInfo};
pub use cells::{Cell, Grid};
