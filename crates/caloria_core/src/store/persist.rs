//! Persisted envelope codec for the food log.
//!
//! # Responsibility
//! - Encode/decode the `{"state":{"foods":[...]},"version":N}` envelope.
//! - Read and write that envelope through a `KeyValueStorage`.
//!
//! # Invariants
//! - `STORAGE_KEY` never changes without a migration step.
//! - Envelopes with a newer `version` are rejected rather than misread.

use crate::model::food_log::FoodLog;
use crate::storage::{KeyValueStorage, StorageError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot name holding the serialized food log.
pub const STORAGE_KEY: &str = "calor-ia-storage";

/// Envelope version written by this build.
pub const STATE_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedEnvelope {
    state: FoodLog,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize)]
struct PersistedEnvelopeRef<'a> {
    state: &'a FoodLog,
    version: u32,
}

/// Error raised while reading or writing the persisted food log.
#[derive(Debug)]
pub enum PersistError {
    Storage(StorageError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    UnsupportedVersion { found: u32, supported: u32 },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode food log: {err}"),
            Self::Decode(err) => write!(f, "failed to decode food log: {err}"),
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "food log version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<StorageError> for PersistError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Serializes a food log into the persisted envelope text.
pub fn encode_food_log(log: &FoodLog) -> Result<String, PersistError> {
    serde_json::to_string(&PersistedEnvelopeRef {
        state: log,
        version: STATE_VERSION,
    })
    .map_err(PersistError::Encode)
}

/// Parses persisted envelope text back into a food log.
///
/// # Errors
/// - `Decode` when the text is not a valid envelope.
/// - `UnsupportedVersion` when the envelope comes from a newer build.
pub fn decode_food_log(raw: &str) -> Result<FoodLog, PersistError> {
    let envelope: PersistedEnvelope = serde_json::from_str(raw).map_err(PersistError::Decode)?;
    if envelope.version > STATE_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: envelope.version,
            supported: STATE_VERSION,
        });
    }
    Ok(envelope.state)
}

/// Reads the food log slot. `Ok(None)` when the slot is absent.
pub fn try_load_food_log<S: KeyValueStorage + ?Sized>(
    storage: &S,
) -> Result<Option<FoodLog>, PersistError> {
    match storage.get(STORAGE_KEY)? {
        Some(raw) => decode_food_log(&raw).map(Some),
        None => Ok(None),
    }
}

/// Reads the food log slot, degrading to an empty log on any failure.
pub fn load_food_log<S: KeyValueStorage + ?Sized>(storage: &S) -> FoodLog {
    match try_load_food_log(storage) {
        Ok(Some(log)) => {
            debug!(
                "event=store_load module=store status=ok records={}",
                log.len()
            );
            log
        }
        Ok(None) => {
            debug!("event=store_load module=store status=ok records=0 slot=absent");
            FoodLog::new()
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=degraded error_code=slot_unreadable error={}",
                err
            );
            FoodLog::new()
        }
    }
}

/// Writes the full food log into its slot.
pub fn save_food_log<S: KeyValueStorage + ?Sized>(
    storage: &S,
    log: &FoodLog,
) -> Result<(), PersistError> {
    let encoded = encode_food_log(log)?;
    storage.set(STORAGE_KEY, &encoded)?;
    Ok(())
}

/// Deletes the food log slot. An absent slot is not an error.
pub fn clear_food_log<S: KeyValueStorage + ?Sized>(storage: &S) -> Result<(), PersistError> {
    storage.remove(STORAGE_KEY)?;
    Ok(())
}
