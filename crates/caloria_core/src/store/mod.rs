//! Food store: canonical log state plus its persisted mirror.
//!
//! # Responsibility
//! - Apply add/remove commands to the in-memory `FoodLog`.
//! - Write the full log to one key-value slot after every command.
//! - Rehydrate the log from that slot once at open.
//!
//! # Invariants
//! - Persistence failures never surface to callers; they degrade to an empty
//!   log on read and to memory-only state on write.
//! - The slot key and envelope layout are stable across versions.

pub mod food_store;
pub mod persist;
