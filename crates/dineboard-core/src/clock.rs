//! Clock and Zone: where "now" and "local time" come from
use crate::error::DineboardError;
use crate::timestamp::Moment;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Time zone used for every local-time computation (week and month anchors,
/// local midnight, hour-of-day bucketing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Host time zone, like a browser `Date`
    #[default]
    Local,
    /// Fixed offset from UTC
    Fixed(FixedOffset),
}

impl Zone {
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    /// Fixed zone from an offset in minutes east of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, DineboardError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Zone::Fixed)
            .ok_or_else(|| DineboardError::ConfigError(format!("utc offset {} minutes out of range", minutes)))
    }

    /// Wall-clock reading of an instant in this zone.
    pub fn to_local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Local => at.with_timezone(&Local).naive_local(),
            Zone::Fixed(offset) => at.with_timezone(offset).naive_local(),
        }
    }

    /// Resolve a moment to an absolute instant. Floating wall-clock times are
    /// read in this zone; a time skipped by a DST jump resolves to `None`.
    pub fn resolve(&self, moment: &Moment) -> Option<DateTime<Utc>> {
        match moment {
            Moment::Absolute(at) => Some(*at),
            Moment::Floating(naive) => match self {
                Zone::Local => Local
                    .from_local_datetime(naive)
                    .earliest()
                    .map(|dt| dt.with_timezone(&Utc)),
                Zone::Fixed(offset) => offset
                    .from_local_datetime(naive)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc)),
            },
        }
    }

    /// Wall-clock reading of a moment in this zone.
    pub fn local_of(&self, moment: &Moment) -> NaiveDateTime {
        match moment {
            Moment::Absolute(at) => self.to_local(*at),
            Moment::Floating(naive) => *naive,
        }
    }

    /// Local calendar date of an instant.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.to_local(now).date()
    }
}

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for reproducible reports and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
