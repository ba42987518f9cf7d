//! Food form state machine.
//!
//! # Responsibility
//! - Track open/closed state, in-progress input and per-field errors.
//! - Submit validated input to a `FoodStore`, or cancel without touching it.
//!
//! # Invariants
//! - Editing a field clears only that field's error.
//! - Every close (saved or cancelled) resets input with a fresh default time.
//! - Edits, submit and cancel are rejected while the form is closed.

use crate::clock::Clock;
use crate::form::validation::{coerce_calories, validate_form, FieldErrors, FormField};
use crate::model::food::{FoodFormData, FoodRecord};
use crate::storage::KeyValueStorage;
use crate::store::food_store::FoodStore;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Closed,
    Open,
}

/// Result of a submit attempt on an open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was valid; the record was added and the form closed.
    Saved(FoodRecord),
    /// Input was invalid; the form stays open with these errors shown.
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// The operation needs an open form.
    NotOpen,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "food form is not open"),
        }
    }
}

impl Error for FormError {}

/// Create-entry form bound to a clock for its default time.
pub struct FoodForm<C: Clock> {
    state: FormState,
    data: FoodFormData,
    errors: FieldErrors,
    clock: C,
}

impl<C: Clock> FoodForm<C> {
    /// Creates a closed form holding initial input.
    pub fn new(clock: C) -> Self {
        let data = initial_data(&clock);
        Self {
            state: FormState::Closed,
            data,
            errors: FieldErrors::default(),
            clock,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == FormState::Open
    }

    /// Opens the form with empty fields and the current local time.
    ///
    /// Opening an already open form keeps its input.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.reset();
        self.state = FormState::Open;
        debug!("event=form_open module=form status=ok");
    }

    pub fn data(&self) -> &FoodFormData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Calorie field text; `0` means unset and renders blank.
    pub fn calories_display(&self) -> String {
        if self.data.calories == 0 {
            String::new()
        } else {
            self.data.calories.to_string()
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_open()?;
        self.data.name = value.into();
        self.errors.clear(FormField::Name);
        Ok(())
    }

    pub fn set_quantity(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_open()?;
        self.data.quantity = value.into();
        self.errors.clear(FormField::Quantity);
        Ok(())
    }

    pub fn set_calories(&mut self, value: i64) -> Result<(), FormError> {
        self.ensure_open()?;
        self.data.calories = value;
        self.errors.clear(FormField::Calories);
        Ok(())
    }

    /// Sets calories from raw text, coercing unparsable input to `0`.
    pub fn set_calories_text(&mut self, raw: &str) -> Result<(), FormError> {
        self.set_calories(coerce_calories(raw))
    }

    pub fn set_time(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_open()?;
        self.data.time = value.into();
        self.errors.clear(FormField::Time);
        Ok(())
    }

    /// Applies raw text to one field.
    pub fn set_field(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        match field {
            FormField::Name => self.set_name(raw),
            FormField::Quantity => self.set_quantity(raw),
            FormField::Calories => self.set_calories_text(raw),
            FormField::Time => self.set_time(raw),
        }
    }

    /// Validates input and, when valid, adds it to `store`.
    ///
    /// # Errors
    /// - `FormError::NotOpen` when the form is closed.
    pub fn submit<S, SC>(
        &mut self,
        store: &mut FoodStore<S, SC>,
    ) -> Result<SubmitOutcome, FormError>
    where
        S: KeyValueStorage,
        SC: Clock,
    {
        self.ensure_open()?;

        let errors = validate_form(&self.data);
        if !errors.is_empty() {
            debug!(
                "event=form_submit module=form status=invalid fields={}",
                errors
                    .iter()
                    .map(|(field, _)| field.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            );
            self.errors = errors.clone();
            return Ok(SubmitOutcome::Invalid(errors));
        }

        let record = store.add_food(&self.data);
        self.reset();
        self.state = FormState::Closed;
        debug!(
            "event=form_submit module=form status=ok food_id={}",
            record.id
        );
        Ok(SubmitOutcome::Saved(record))
    }

    /// Discards input and closes the form without touching any store.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        self.reset();
        self.state = FormState::Closed;
        debug!("event=form_cancel module=form status=ok");
        Ok(())
    }

    fn reset(&mut self) {
        self.data = initial_data(&self.clock);
        self.errors = FieldErrors::default();
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(FormError::NotOpen)
        }
    }
}

fn initial_data<C: Clock>(clock: &C) -> FoodFormData {
    FoodFormData {
        time: clock.local_hhmm(),
        ..FoodFormData::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{FoodForm, FormError, FormState};
    use crate::clock::{ManualClock, SystemClock};

    #[test]
    fn new_form_is_closed_and_rejects_edits() {
        let mut form = FoodForm::new(SystemClock);
        assert_eq!(form.state(), FormState::Closed);
        assert_eq!(form.set_name("Pan"), Err(FormError::NotOpen));
        assert_eq!(form.cancel(), Err(FormError::NotOpen));
    }

    #[test]
    fn calories_display_is_blank_when_unset() {
        let clock = ManualClock::utc(chrono::Utc::now());
        let mut form = FoodForm::new(&clock);
        form.open();
        assert_eq!(form.calories_display(), "");
        form.set_calories_text("abc").unwrap();
        assert_eq!(form.calories_display(), "");
        form.set_calories_text("320").unwrap();
        assert_eq!(form.calories_display(), "320");
    }

    #[test]
    fn reopening_an_open_form_keeps_input() {
        let clock = ManualClock::utc(chrono::Utc::now());
        let mut form = FoodForm::new(&clock);
        form.open();
        form.set_name("Pan").unwrap();
        form.open();
        assert_eq!(form.data().name, "Pan");
    }
}
