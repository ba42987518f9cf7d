//! Food store use-case API.
//!
//! # Responsibility
//! - Own the `FoodLog` and the storage/clock collaborators.
//! - Run each command as "mutate, then persist".
//! - Answer "today" queries against the injected clock.
//!
//! # Invariants
//! - Ids are unique within the loaded log; generation retries on collision.
//! - `add_food` does not re-validate input; callers validate through the form.
//! - A failed write leaves the in-memory log updated and is only logged.
//! - `clear` deletes the slot instead of writing an empty log.

use crate::clock::Clock;
use crate::model::food::{FoodFormData, FoodId, FoodRecord};
use crate::model::food_log::FoodLog;
use crate::storage::KeyValueStorage;
use crate::store::persist::{clear_food_log, load_food_log, save_food_log};
use chrono::SubsecRound;
use log::{info, warn};

/// Canonical food log with a persisted mirror.
pub struct FoodStore<S: KeyValueStorage, C: Clock> {
    log: FoodLog,
    storage: S,
    clock: C,
}

impl<S: KeyValueStorage, C: Clock> FoodStore<S, C> {
    /// Opens the store, rehydrating the log from `storage`.
    ///
    /// An absent or unreadable slot yields an empty log.
    pub fn open(storage: S, clock: C) -> Self {
        let log = load_food_log(&storage);
        info!(
            "event=store_open module=store status=ok records={}",
            log.len()
        );
        Self {
            log,
            storage,
            clock,
        }
    }

    /// Appends a record built from `data` and persists the log.
    ///
    /// Returns the created record, including its assigned id.
    pub fn add_food(&mut self, data: &FoodFormData) -> FoodRecord {
        let created_at = self.clock.now().trunc_subsecs(3);
        let mut id = FoodId::generate(created_at);
        while self.log.contains_id(&id) {
            id = FoodId::generate(created_at);
        }
        if data.calories <= 0 || data.calories > i64::from(u32::MAX) {
            warn!(
                "event=food_add module=store status=degraded error_code=calories_out_of_range food_id={}",
                id
            );
        }

        let record = FoodRecord::from_form(id, data, created_at);
        self.log.push(record.clone());
        info!(
            "event=food_add module=store status=ok food_id={} records={}",
            record.id,
            self.log.len()
        );
        self.persist("food_add");
        record
    }

    /// Removes the first record with `id`. Missing ids are a no-op.
    ///
    /// Returns whether a record was removed. The log is persisted either way.
    pub fn remove_food(&mut self, id: &str) -> bool {
        let removed = self.log.remove(id).is_some();
        if removed {
            info!(
                "event=food_remove module=store status=ok food_id={} records={}",
                id,
                self.log.len()
            );
        } else {
            info!("event=food_remove module=store status=noop food_id={id}");
        }
        self.persist("food_remove");
        removed
    }

    /// Drops every record and deletes the persisted slot.
    ///
    /// Returns how many records were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = std::mem::take(&mut self.log).len();
        info!("event=food_clear module=store status=ok dropped={dropped}");
        if let Err(err) = clear_food_log(&self.storage) {
            warn!(
                "event=store_persist module=store status=error command=food_clear records=0 error={}",
                err
            );
        }
        dropped
    }

    /// Records created on the current local date, in insertion order.
    pub fn today_foods(&self) -> Vec<&FoodRecord> {
        self.log.records_on(self.clock.today(), &self.clock)
    }

    /// Calorie sum over `today_foods()`.
    pub fn total_calories(&self) -> u64 {
        self.log.total_calories_on(self.clock.today(), &self.clock)
    }

    /// Every stored record in insertion order.
    pub fn foods(&self) -> &[FoodRecord] {
        self.log.foods()
    }

    pub fn find_food(&self, id: &str) -> Option<&FoodRecord> {
        self.log.find(id)
    }

    pub fn log(&self) -> &FoodLog {
        &self.log
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn persist(&self, command: &'static str) {
        if let Err(err) = save_food_log(&self.storage, &self.log) {
            warn!(
                "event=store_persist module=store status=error command={} records={} error={}",
                command,
                self.log.len(),
                err
            );
        }
    }
}
