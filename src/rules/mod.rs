//! Rule derivation and application.
//!
//! Rules are never stored between ticks. After every tick, undo and redo the
//! orchestrator runs `RuleAnalyzer::derive` on the grid, applies every
//! persistent (attribute) rule to the attribute table, then applies action
//! (conversion) rules through reversible commands.

pub mod analyzer;
pub mod rule;

pub use analyzer::{conversions, RuleAnalyzer};
pub use rule::{Rule, RuleSet};
