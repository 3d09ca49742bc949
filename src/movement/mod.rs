//! Tick resolution: movement, destructive interactions, win/lose.
//!
//! ## Phases
//!
//! 1. `MovementResolver::player_moves`: You blocks follow the operation
//! 2. `MovementResolver::autonomous_moves`: Move blocks follow their facing,
//!    columns first, then rows
//! 3. `interactions::destructions`: Sink, Defeat, Hot/Melt
//! 4. `outcome::evaluate`: You+Win succeeds, You+Defeat fails
//!
//! Every phase only computes commands; the orchestrator performs and records
//! them.

pub mod interactions;
pub mod line;
pub mod outcome;
pub mod resolver;

pub use interactions::destructions;
pub use line::{LineResolver, Sense};
pub use outcome::{evaluate, GameResult};
pub use resolver::MovementResolver;
