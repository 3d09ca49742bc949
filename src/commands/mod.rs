//! Reversible commands and tick history.
//!
//! Every grid mutation during play is a `Command`. The commands one operation
//! produces form a `Tick`, which the `History` can undo and redo atomically.

pub mod command;
pub mod history;

pub use command::Command;
pub use history::{History, Tick};
pub(crate) use history::note_violation;
