//! Submission validation rules for food form input.
//!
//! # Invariants
//! - `name` and `quantity` must be non-empty after trimming.
//! - `calories` must be positive; unparsable input coerces to `0`.
//! - `time` is never validated.

use crate::model::food::FoodFormData;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::num::IntErrorKind;

pub const NAME_REQUIRED: &str = "El nombre es obligatorio";
pub const QUANTITY_REQUIRED: &str = "La cantidad es obligatoria";
pub const CALORIES_NOT_POSITIVE: &str = "Las calorias deben ser un numero positivo";

static LEADING_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?)([0-9]+)").expect("valid leading integer regex"));

/// Editable field of the food form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Quantity,
    Calories,
    Time,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Quantity,
        FormField::Calories,
        FormField::Time,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Quantity => "quantity",
            Self::Calories => "calories",
            Self::Time => "time",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "quantity" => Some(Self::Quantity),
            "calories" => Some(Self::Calories),
            "time" => Some(Self::Time),
            _ => None,
        }
    }
}

/// Per-field validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FormField, &'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.errors.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    pub(crate) fn insert(&mut self, field: FormField, message: &'static str) {
        self.errors.insert(field, message);
    }

    pub(crate) fn clear(&mut self, field: FormField) {
        self.errors.remove(&field);
    }
}

/// Validates submitted form data and returns every failing field.
pub fn validate_form(data: &FoodFormData) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if data.name.trim().is_empty() {
        errors.insert(FormField::Name, NAME_REQUIRED);
    }
    if data.quantity.trim().is_empty() {
        errors.insert(FormField::Quantity, QUANTITY_REQUIRED);
    }
    if data.calories <= 0 {
        errors.insert(FormField::Calories, CALORIES_NOT_POSITIVE);
    }
    errors
}

/// Coerces raw calorie text to an integer.
///
/// Takes the leading ASCII base-10 integer after optional whitespace and
/// sign (`"250 kcal"` -> 250, `"12.9"` -> 12). Anything without a leading
/// integer becomes `0`, including digits from other scripts. Magnitudes
/// beyond `i64` saturate.
pub fn coerce_calories(raw: &str) -> i64 {
    let Some(captures) = LEADING_INTEGER_RE.captures(raw) else {
        return 0;
    };
    let negative = &captures[1] == "-";
    let digits = &captures[2];
    match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => {
            if negative {
                i64::MIN
            } else {
                i64::MAX
            }
        }
        Err(_) => 0,
    }
}
