//! Entity metadata types.
//!
//! Entities are mapped to tables and may hold relations to other entities.
//! Embeddables are value objects stored inline in their owner's table.

mod entity;
mod field;

pub use entity::*;
pub use field::*;
