//! Sample vocabulary and a fluent level builder.

pub mod builder;
pub mod classic;

pub use builder::LevelBuilder;
