//! Core engine types: directions, operations, configuration, errors.
//!
//! This module holds the leaf building blocks every other module depends on.
//! Games configure entity types, categories and maps via `ConfigSet` (or any
//! other `ConfigPort`) rather than modifying the engine.

pub mod direction;
pub mod operation;
pub mod config;
pub mod error;

pub use direction::{Axis, Direction, Displacement, Position};
pub use operation::OperationType;
pub use config::{
    AttributeCategory, CategoryId, ConfigPort, ConfigSet, EntityCategoryDescriptor,
    EntityTypeDescriptor, EntityTypeId, Keyword, MapDescriptor, MapId, PlacedBlock, RuleWord,
};
pub use error::{EngineError, GridError, Result};
