//! Attribute resolution.
//!
//! Attributes are behavioral capabilities (You, Push, Stop, ...) granted to an
//! entity type or a whole category. They come from two sources: inherent
//! category attributes in the config, and persistent rules derived from the
//! grid each tick.

pub mod set;
pub mod table;

pub use set::AttributeSet;
pub use table::AttributeTable;
