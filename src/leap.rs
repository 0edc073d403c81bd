use std::convert::TryFrom;
use tracing::{info, warn};

use crate::date::*;
use crate::gpstime::*;

// GPS-UTC is TAI-UTC less the 19 seconds that had accumulated by the
// GPS epoch; it changes only when IERS Bulletin C announces a leap.

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LeapSec {
    mjd: MJD,
    gps: i16,
}

impl LeapSec {
    pub const fn new(date: Gregorian, gps: i16) -> LeapSec {
        LeapSec { mjd: date.mjd(), gps }
    }
    pub const fn epoch() -> LeapSec {
        LeapSec::new(GPS_EPOCH, 0)
    }
    pub fn mjd(self) -> MJD {
        self.mjd
    }
    /// Midnight UTC at the start of the day this count takes effect.
    pub fn utc(self) -> UtcTime {
        UtcTime::midnight(self.mjd)
    }
    /// GPS-UTC in seconds
    pub fn gps(self) -> i16 {
        self.gps
    }
}

impl std::fmt::Display for LeapSec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} GPS-UTC {}", self.mjd, self.gps)
    }
}

const fn leap(y: i32, m: i32, d: i32, gps: i16) -> LeapSec {
    LeapSec::new(Gregorian(y, m, d), gps)
}

pub static LEAP_SECONDS: [LeapSec; 19] = [
    LeapSec::epoch(),
    leap(1981, 7, 1, 1),
    leap(1982, 7, 1, 2),
    leap(1983, 7, 1, 3),
    leap(1985, 7, 1, 4),
    leap(1988, 1, 1, 5),
    leap(1990, 1, 1, 6),
    leap(1991, 1, 1, 7),
    leap(1992, 7, 1, 8),
    leap(1993, 7, 1, 9),
    leap(1994, 7, 1, 10),
    leap(1996, 1, 1, 11),
    leap(1997, 7, 1, 12),
    leap(1999, 1, 1, 13),
    leap(2006, 1, 1, 14),
    leap(2009, 1, 1, 15),
    leap(2012, 7, 1, 16),
    leap(2015, 7, 1, 17),
    leap(2017, 1, 1, 18),
];

/// The outcome of a leap second lookup.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lookup {
    /// a later entry in the table bounds the instant
    Known(LeapSec),
    /// the instant is after the last entry, which may be out of date
    Stale(LeapSec),
}

impl Lookup {
    pub fn leap(self) -> LeapSec {
        match self {
            Lookup::Known(leap) => leap,
            Lookup::Stale(leap) => leap,
        }
    }
    pub fn is_stale(self) -> bool {
        matches!(self, Lookup::Stale(_))
    }
}

/// A leap second table sorted by date, starting at the GPS epoch.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LeapTable<'a>(&'a [LeapSec]);

impl LeapTable<'static> {
    pub fn builtin() -> LeapTable<'static> {
        LeapTable(&LEAP_SECONDS)
    }
}

impl<'a> TryFrom<&'a [LeapSec]> for LeapTable<'a> {
    type Error = Error;

    fn try_from(list: &'a [LeapSec]) -> Result<LeapTable<'a>> {
        let mut prev = match list.first() {
            Some(&first) => first,
            None => return Err(Error::Empty),
        };
        if prev != LeapSec::epoch() {
            return Err(Error::FalseStart(prev));
        }
        for &this in &list[1..] {
            if this.mjd() <= prev.mjd() {
                return Err(Error::OutOfOrder(prev, this));
            }
            if this.gps() != prev.gps() + 1 {
                return Err(Error::WrongStep(prev, this));
            }
            prev = this;
        }
        Ok(LeapTable(list))
    }
}

impl<'a> LeapTable<'a> {
    pub fn entries(self) -> &'a [LeapSec] {
        self.0
    }

    /// Find the latest entry that is not after `utc`.
    pub fn resolve(self, utc: UtcTime) -> Result<Lookup> {
        let found = self.0.iter().take_while(|leap| leap.utc() <= utc).last();
        let leap = match found {
            Some(&leap) => leap,
            None => return Err(Error::BeforeEpoch(utc)),
        };
        if self.0.last() == Some(&leap) && leap.utc() < utc {
            warn!(
                "{} exceeds last leap second addition date of {}; \
                 leap seconds set to {}",
                utc.date(),
                leap.utc().date(),
                leap.gps(),
            );
            Ok(Lookup::Stale(leap))
        } else {
            info!(
                "there were {} leap seconds after {}",
                leap.gps(),
                leap.utc().date(),
            );
            Ok(Lookup::Known(leap))
        }
    }
}
