use std::convert::TryFrom;
use thiserror::Error;
use tracing::debug;

use crate::date::*;
use crate::leap::*;

pub const DAYS_PER_WEEK: i64 = 7;
pub const SECS_PER_WEEK: i64 = SECS_PER_DAY * DAYS_PER_WEEK;

// GPS time has run without leap seconds since its epoch, so it now
// differs from UTC by the number of leap seconds inserted since then.
pub const GPS_EPOCH: Gregorian = Gregorian(1980, 1, 6);

/// A GPS week number and the time elapsed since the start of that week.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GpsTime {
    week: u32,
    nanos: i64,
    leap: LeapSec,
}

impl GpsTime {
    /// Convert a UTC instant to GPS time, given the leap second entry
    /// that is in effect at that instant.
    pub fn new(utc: UtcTime, leap: LeapSec) -> Result<GpsTime> {
        let epoch = UtcTime::from(GPS_EPOCH);
        if utc < epoch {
            return Err(Error::BeforeEpoch(utc));
        }
        let nanos = utc.nanos_of_day() + i64::from(leap.gps()) * NANOS_PER_SEC;
        let days = i64::from(utc.mjd() - epoch.mjd())
            + nanos.div_euclid(NANOS_PER_DAY);
        let nanos = nanos.rem_euclid(NANOS_PER_DAY);
        let week = u32::try_from(days.div_euclid(DAYS_PER_WEEK))?;
        let weekday = days.rem_euclid(DAYS_PER_WEEK);
        debug!(days, week, weekday, leap = leap.gps(), "since GPS epoch");
        Ok(GpsTime { week, nanos: weekday * NANOS_PER_DAY + nanos, leap })
    }

    /// Convert using a particular leap second table.
    pub fn with_table(utc: UtcTime, table: &LeapTable) -> Result<GpsTime> {
        GpsTime::new(utc, table.resolve(utc)?.leap())
    }

    pub fn week(self) -> u32 {
        self.week
    }
    pub fn nanos_of_week(self) -> i64 {
        self.nanos
    }
    /// Time of week, in the range `0.0 .. 604800.0`
    pub fn seconds_of_week(self) -> f64 {
        let secs = self.nanos / NANOS_PER_SEC;
        let subsec = self.nanos % NANOS_PER_SEC;
        secs as f64 + subsec as f64 / NANOS_PER_SEC as f64
    }
    pub fn leap(self) -> LeapSec {
        self.leap
    }
    pub fn leap_seconds(self) -> i16 {
        self.leap.gps()
    }
}

impl TryFrom<UtcTime> for GpsTime {
    type Error = Error;
    fn try_from(utc: UtcTime) -> Result<GpsTime> {
        GpsTime::with_table(utc, &LeapTable::builtin())
    }
}

// TOW is rounded to two places, so the last 5ms of a week print as
// 604800.00 even though seconds_of_week() stays below it.
impl std::fmt::Display for GpsTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GPS WEEK: {}, TOW: {:.2}", self.week, self.seconds_of_week())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("expected at most two arguments, found {0}")]
    Args(usize),
    #[error("{0} precedes the GPS epoch 1980-01-06 00:00:00+00:00")]
    BeforeEpoch(UtcTime),
    #[error("invalid date {0}")]
    Date(Gregorian),
    #[error("leap second table is empty")]
    Empty,
    #[error("leap second table does not start at the GPS epoch ({0})")]
    FalseStart(LeapSec),
    #[error("integer out of range: {0}")]
    FromInt(#[from] std::num::TryFromIntError),
    #[error("expected Unix time in milliseconds, found {0:?}")]
    Millis(String, #[source] std::num::ParseIntError),
    #[error("parse error {0}")]
    Nom(String),
    #[error("expected a time of day like HH:MM:SS, found {0:?}")]
    NotATime(String),
    #[error("UTC offset {0:02}:{1:02} is out of range")]
    Offset(i32, i32),
    #[error("leap seconds are disordered ({0} -> {1})")]
    OutOfOrder(LeapSec, LeapSec),
    #[error("day number {0} is outside 0001-01-01 .. 9999-12-31")]
    Range(i64),
    #[error("invalid time of day {0:02}:{1:02}:{2:02}")]
    Time(i32, i32, i32),
    #[error("leap is not +1 ({0} -> {1})")]
    WrongStep(LeapSec, LeapSec),
}
