//! Food record domain model.
//!
//! # Responsibility
//! - Define `FoodRecord`, the persisted log entry, and `FoodFormData`, the
//!   transient input used to build one.
//! - Own the wire shape of a record (`id, name, quantity, calories, time,
//!   createdAt`).
//!
//! # Invariants
//! - `created_at` is assigned once at creation and never rewritten.
//! - `calories` of a stored record is positive when it came through the form.
//! - `createdAt` is written as RFC 3339 UTC with millisecond precision, and
//!   records never hold finer precision than that.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ID_SUFFIX_LEN: usize = 7;
const CREATED_AT_SUBSEC_DIGITS: u16 = 3;

/// Opaque stable identifier of a food record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(String);

impl FoodId {
    /// Wraps an existing identifier (for example one typed by the user).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates `<epoch millis>-<random suffix>` for the given instant.
    ///
    /// The suffix is taken from a v4 UUID, so two calls in the same
    /// millisecond still differ with overwhelming probability. Callers that
    /// need a hard guarantee check against existing ids.
    pub fn generate(at: DateTime<Utc>) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}-{}",
            at.timestamp_millis(),
            &random[..ID_SUFFIX_LEN]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FoodId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FoodId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One consumed item in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: FoodId,
    pub name: String,
    /// Free-form magnitude and unit, e.g. `200g` or `1 taza`.
    pub quantity: String,
    pub calories: u32,
    /// Wall-clock time the user entered, `HH:MM`. Not validated.
    pub time: String,
    /// Creation instant. Serialized as `createdAt` to match the stored layout.
    #[serde(rename = "createdAt", with = "created_at_format")]
    pub created_at: DateTime<Utc>,
}

impl FoodRecord {
    /// Builds a record from form input without re-validating it.
    ///
    /// `created_at` is truncated to whole milliseconds so the record equals
    /// its persisted copy. Calories outside the `u32` domain are clamped; a
    /// validated form never produces them.
    pub fn from_form(id: FoodId, data: &FoodFormData, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name.clone(),
            quantity: data.quantity.clone(),
            calories: clamp_calories(data.calories),
            time: data.time.clone(),
            created_at: created_at.trunc_subsecs(CREATED_AT_SUBSEC_DIGITS),
        }
    }
}

/// Transient form input used only to construct a `FoodRecord`.
///
/// `calories == 0` means "unset" and renders as a blank field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodFormData {
    pub name: String,
    pub quantity: String,
    pub calories: i64,
    pub time: String,
}

impl FoodFormData {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        calories: i64,
        time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            calories,
            time: time.into(),
        }
    }
}

pub(crate) fn clamp_calories(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

mod created_at_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|err| serde::de::Error::custom(format!("invalid createdAt `{raw}`: {err}")))
    }
}
