//! In-memory food log state.
//!
//! # Responsibility
//! - Hold the canonical ordered sequence of `FoodRecord`.
//! - Apply append/remove commands and answer per-day queries.
//!
//! # Invariants
//! - Sequence order equals insertion order.
//! - This type performs no I/O; persistence is layered on top by the store.

use crate::clock::Clock;
use crate::model::food::{FoodId, FoodRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered food records. Serialized as `{"foods": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodLog {
    foods: Vec<FoodRecord>,
}

impl FoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(foods: Vec<FoodRecord>) -> Self {
        Self { foods }
    }

    /// All records in insertion order.
    pub fn foods(&self) -> &[FoodRecord] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn contains_id(&self, id: &FoodId) -> bool {
        self.foods.iter().any(|food| &food.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&FoodRecord> {
        self.foods.iter().find(|food| food.id.as_str() == id)
    }

    /// Appends one record at the end of the sequence.
    pub fn push(&mut self, record: FoodRecord) {
        self.foods.push(record);
    }

    /// Removes the first record with a matching id.
    ///
    /// Returns `None` when nothing matches.
    pub fn remove(&mut self, id: &str) -> Option<FoodRecord> {
        let index = self.foods.iter().position(|food| food.id.as_str() == id)?;
        Some(self.foods.remove(index))
    }

    /// Records whose creation instant falls on `day` in the clock's local
    /// time zone, in insertion order.
    pub fn records_on<C: Clock + ?Sized>(&self, day: NaiveDate, clock: &C) -> Vec<&FoodRecord> {
        self.foods
            .iter()
            .filter(|food| clock.local_date_of(food.created_at) == day)
            .collect()
    }

    /// Calorie sum over `records_on(day)`.
    pub fn total_calories_on<C: Clock + ?Sized>(&self, day: NaiveDate, clock: &C) -> u64 {
        self.records_on(day, clock)
            .into_iter()
            .map(|food| u64::from(food.calories))
            .sum()
    }
}
