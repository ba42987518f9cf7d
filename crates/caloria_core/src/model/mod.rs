//! Domain model for the food log.
//!
//! # Responsibility
//! - Define the canonical food record and the transient form input shape.
//! - Keep the in-memory log free of storage and clock concerns.
//!
//! # Invariants
//! - Every record is identified by a `FoodId` unique within one log.
//! - Records are immutable once appended; removal is the only mutation.

pub mod food;
pub mod food_log;
