//! Clock seam for creation instants and local calendar dates.
//!
//! # Responsibility
//! - Provide the current instant and map instants to local date/time.
//! - Let tests pin "now" and the time zone deterministically.
//!
//! # Invariants
//! - "Today" is the local calendar date of `now()`, evaluated per call.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Offset, Utc};
use std::cell::Cell;

/// Source of the current instant and of the local time zone.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `instant` in the local time zone.
    fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate;

    /// Wall-clock time of `instant` in the local time zone.
    fn local_time_of(&self, instant: DateTime<Utc>) -> NaiveTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.local_date_of(self.now())
    }

    /// Current local time formatted as `HH:MM`.
    fn local_hhmm(&self) -> String {
        self.local_time_of(self.now()).format("%H:%M").to_string()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        (**self).local_date_of(instant)
    }

    fn local_time_of(&self, instant: DateTime<Utc>) -> NaiveTime {
        (**self).local_time_of(instant)
    }
}

/// Host clock in the process's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }

    fn local_time_of(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&Local).time()
    }
}

/// Settable clock with a fixed UTC offset.
///
/// Uses interior mutability so a store can borrow it while a test moves
/// time forward.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
    offset: FixedOffset,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: Cell::new(now),
            offset,
        }
    }

    /// Clock pinned at `now` in UTC.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    fn local_time_of(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&self.offset).time()
    }
}
