//! Core domain logic for the CALOR-IA calorie log.
//! This crate is the single source of truth for food log invariants.

pub mod clock;
pub mod form;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use form::food_form::{FoodForm, FormError, FormState, SubmitOutcome};
pub use form::validation::{coerce_calories, validate_form, FieldErrors, FormField};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::food::{FoodFormData, FoodId, FoodRecord};
pub use model::food_log::FoodLog;
pub use storage::{
    KeyValueStorage, MemoryKeyValueStorage, SqliteKeyValueStorage, StorageError, StorageResult,
    SLOT_SCHEMA_VERSION,
};
pub use store::food_store::FoodStore;
pub use store::persist::{
    clear_food_log, decode_food_log, encode_food_log, load_food_log, save_food_log,
    try_load_food_log, PersistError, STATE_VERSION, STORAGE_KEY,
};
pub use view::{render_header, render_list, FoodListView, FoodRowView, HeaderView, NumberFormat};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
