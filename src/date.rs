use std::convert::TryFrom;

use crate::gpstime::*;

pub const NANOS_PER_MILLI: i64 = 1_000_000;
pub const NANOS_PER_SEC: i64 = 1_000_000_000;
pub const SECS_PER_DAY: i64 = 86_400;
pub const NANOS_PER_DAY: i64 = SECS_PER_DAY * NANOS_PER_SEC;
pub const MILLIS_PER_DAY: i64 = NANOS_PER_DAY / NANOS_PER_MILLI;

#[derive(Copy, Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Gregorian(pub i32, pub i32, pub i32);

impl std::fmt::Display for Gregorian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl Gregorian {
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> i32 {
        self.1
    }
    pub fn day(self) -> i32 {
        self.2
    }
    pub const fn mjd(self) -> MJD {
        let Gregorian(y, m, d) = self;
        let (y, m) = if m > 2 { (y, m + 1) } else { (y - 1, m + 13) };
        MJD(days_in_years(y) + muldiv(m, 153, 5) + d - 679004)
    }
    /// A date is valid when it survives a trip through its day number.
    pub fn check(self) -> Result<Gregorian> {
        let in_range = (1..=12).contains(&self.month())
            && (1..=31).contains(&self.day())
            && (1..=9999).contains(&self.year());
        if in_range && Gregorian::from(self.mjd()) == self {
            Ok(self)
        } else {
            Err(Error::Date(self))
        }
    }
}

impl From<MJD> for Gregorian {
    fn from(mjd: MJD) -> Gregorian {
        let mut d = mjd.0 + 678881;
        let mut y = muldiv(d, 400, 146097) + 1;
        y -= (days_in_years(y) > d) as i32;
        d -= days_in_years(y) - 31;
        let m = muldiv(d, 17, 520);
        d -= muldiv(m, 520, 17);
        if m > 10 {
            Gregorian(y + 1, m - 10, d)
        } else {
            Gregorian(y, m + 2, d)
        }
    }
}

impl From<Gregorian> for MJD {
    fn from(date: Gregorian) -> MJD {
        date.mjd()
    }
}

const fn days_in_years(y: i32) -> i32 {
    muldiv(y, 1461, 4) - muldiv(y, 1, 100) + muldiv(y, 1, 400)
}

const fn muldiv(var: i32, mul: i32, div: i32) -> i32 {
    (var * mul).div_euclid(div)
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Eq, Ord, PartialEq, PartialOrd)]
pub struct MJD(i32);

impl std::fmt::Display for MJD {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mjd {}", Gregorian::from(*self), self.0)
    }
}

impl std::fmt::Debug for MJD {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MJD({})", self)
    }
}

impl From<i32> for MJD {
    fn from(mjd: i32) -> MJD {
        MJD(mjd)
    }
}

impl std::ops::Sub<MJD> for MJD {
    type Output = i32;
    fn sub(self, other: MJD) -> i32 {
        self.0 - other.0
    }
}

const UNIX_EPOCH: MJD = Gregorian(1970, 1, 1).mjd();
const FIRST_DAY: MJD = Gregorian(1, 1, 1).mjd();
const FINAL_DAY: MJD = Gregorian(9999, 12, 31).mjd();

////////////////////////////////////////////////////////////////////////

/// A UTC instant: a day number and the nanoseconds elapsed since
/// midnight at the start of that day.
///
/// Leap seconds are not representable; like most civil time APIs a UTC
/// day here is always 86400 seconds long.
#[derive(Copy, Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct UtcTime {
    mjd: MJD,
    nanos: i64,
}

impl UtcTime {
    /// Build an instant from a day number and a nanosecond count that
    /// may spill over either side of that day.
    pub fn from_mjd_nanos(mjd: MJD, nanos: i64) -> Result<UtcTime> {
        UtcTime::from_days_nanos(i64::from(mjd.0), nanos)
    }

    fn from_days_nanos(days: i64, nanos: i64) -> Result<UtcTime> {
        let days = days + nanos.div_euclid(NANOS_PER_DAY);
        let nanos = nanos.rem_euclid(NANOS_PER_DAY);
        if days < i64::from(FIRST_DAY.0) || i64::from(FINAL_DAY.0) < days {
            return Err(Error::Range(days));
        }
        Ok(UtcTime { mjd: MJD(days as i32), nanos })
    }

    pub fn from_gregorian(
        date: Gregorian,
        hour: i32,
        min: i32,
        sec: i32,
        nanos: i64,
    ) -> Result<UtcTime> {
        let date = date.check()?;
        let time_ok = (0..24).contains(&hour)
            && (0..60).contains(&min)
            && (0..60).contains(&sec)
            && (0..NANOS_PER_SEC).contains(&nanos);
        if !time_ok {
            return Err(Error::Time(hour, min, sec));
        }
        let secs =
            i64::from(hour) * 3600 + i64::from(min) * 60 + i64::from(sec);
        UtcTime::from_mjd_nanos(date.mjd(), secs * NANOS_PER_SEC + nanos)
    }

    pub fn from_unix_millis(millis: i64) -> Result<UtcTime> {
        let days = i64::from(UNIX_EPOCH.0) + millis.div_euclid(MILLIS_PER_DAY);
        let nanos = millis.rem_euclid(MILLIS_PER_DAY) * NANOS_PER_MILLI;
        UtcTime::from_days_nanos(days, nanos)
    }

    pub fn now() -> Result<UtcTime> {
        use std::time::SystemTime;
        // the clock may be set before 1970
        let since = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH);
        let nanos = match since {
            Ok(after) => i128::try_from(after.as_nanos())?,
            Err(before) => -i128::try_from(before.duration().as_nanos())?,
        };
        let days = i64::try_from(nanos.div_euclid(i128::from(NANOS_PER_DAY)))?;
        let nanos = i64::try_from(nanos.rem_euclid(i128::from(NANOS_PER_DAY)))?;
        UtcTime::from_days_nanos(i64::from(UNIX_EPOCH.0) + days, nanos)
    }

    /// Shift by a number of seconds, e.g. to remove a UTC offset.
    pub fn add_seconds(self, secs: i64) -> Result<UtcTime> {
        // whole days first, so the nanosecond count cannot overflow
        let days = i64::from(self.mjd.0) + secs.div_euclid(SECS_PER_DAY);
        let nanos = secs.rem_euclid(SECS_PER_DAY) * NANOS_PER_SEC;
        UtcTime::from_days_nanos(days, self.nanos + nanos)
    }

    pub(crate) fn midnight(mjd: MJD) -> UtcTime {
        UtcTime { mjd, nanos: 0 }
    }

    pub fn mjd(self) -> MJD {
        self.mjd
    }
    pub fn date(self) -> Gregorian {
        Gregorian::from(self.mjd)
    }
    pub fn nanos_of_day(self) -> i64 {
        self.nanos
    }
    pub fn seconds_of_day(self) -> i64 {
        self.nanos / NANOS_PER_SEC
    }
    pub fn subsec_nanos(self) -> i64 {
        self.nanos % NANOS_PER_SEC
    }
}

impl From<Gregorian> for UtcTime {
    /// midnight at the start of the date
    fn from(date: Gregorian) -> UtcTime {
        UtcTime::midnight(date.mjd())
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.seconds_of_day();
        write!(
            f,
            "{} {:02}:{:02}:{:02}",
            self.date(),
            secs / 3600,
            secs / 60 % 60,
            secs % 60,
        )?;
        let micros = self.subsec_nanos() / 1000;
        if micros != 0 {
            write!(f, ".{:06}", micros)?;
        }
        write!(f, "+00:00")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test() {
        for &(date, mjd) in &[
            (Gregorian(-1, 12, 31), -678942),
            (Gregorian(0, 1, 1), -678941),
            (Gregorian(0, 12, 31), -678576),
            (Gregorian(1, 1, 1), -678575),
            (Gregorian(1858, 11, 16), -1),
            (Gregorian(1858, 11, 17), 0),
            (Gregorian(1900, 1, 1), 15020),
            (Gregorian(1970, 1, 1), 40587),
            (Gregorian(1980, 1, 6), 44244),
            (Gregorian(2001, 1, 1), 5 * 146097 - 678575),
            (Gregorian(2020, 2, 2), 58881),
        ] {
            let mjd = MJD::from(mjd);
            assert_eq!(date, Gregorian::from(mjd));
            assert_eq!(mjd, MJD::from(date));
        }
        assert_eq!(146097, days_in_years(400));
    }

    #[test]
    fn check() {
        for &date in &[
            Gregorian(2020, 2, 29),
            Gregorian(2000, 2, 29),
            Gregorian(1, 1, 1),
            Gregorian(9999, 12, 31),
        ] {
            assert_eq!(date, date.check().unwrap());
        }
        for &date in &[
            Gregorian(2019, 2, 29),
            Gregorian(1900, 2, 29),
            Gregorian(2020, 4, 31),
            Gregorian(2020, 13, 1),
            Gregorian(2020, 0, 1),
            Gregorian(2020, 1, 0),
            Gregorian(0, 12, 31),
        ] {
            assert!(matches!(date.check(), Err(Error::Date(d)) if d == date));
        }
    }

    #[test]
    fn unix_millis() {
        let epoch = UtcTime::from_unix_millis(0).unwrap();
        assert_eq!(epoch, UtcTime::from(Gregorian(1970, 1, 1)));
        assert_eq!("1970-01-01 00:00:00+00:00", epoch.to_string());

        let gps = UtcTime::from_unix_millis(315_964_800_000).unwrap();
        assert_eq!(gps, UtcTime::from(Gregorian(1980, 1, 6)));

        let before = UtcTime::from_unix_millis(-1).unwrap();
        assert_eq!(Gregorian(1969, 12, 31), before.date());
        assert_eq!(SECS_PER_DAY - 1, before.seconds_of_day());
        assert_eq!(999_000_000, before.subsec_nanos());
        assert_eq!("1969-12-31 23:59:59.999000+00:00", before.to_string());

        let later = UtcTime::from_unix_millis(1_584_273_600_123).unwrap();
        assert_eq!("2020-03-15 12:00:00.123000+00:00", later.to_string());

        assert!(matches!(
            UtcTime::from_unix_millis(i64::MAX),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            UtcTime::from_unix_millis(i64::MIN),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            UtcTime::from_unix_millis(300_000_000_000_000),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn gregorian_time() {
        let t = UtcTime::from_gregorian(Gregorian(2020, 3, 15), 12, 34, 56, 7)
            .unwrap();
        assert_eq!(Gregorian(2020, 3, 15), t.date());
        assert_eq!(12 * 3600 + 34 * 60 + 56, t.seconds_of_day());
        assert_eq!(7, t.subsec_nanos());
        for &(h, m, s) in &[(24, 0, 0), (0, 60, 0), (0, 0, 60), (-1, 0, 0)] {
            let bad = UtcTime::from_gregorian(Gregorian(2020, 3, 15), h, m, s, 0);
            assert!(matches!(bad, Err(Error::Time(..))));
        }
    }

    #[test]
    fn spill() {
        let midnight = UtcTime::from(Gregorian(2016, 12, 31));
        let next = UtcTime::from_mjd_nanos(midnight.mjd(), NANOS_PER_DAY).unwrap();
        assert_eq!(UtcTime::from(Gregorian(2017, 1, 1)), next);
        let prev = UtcTime::from_mjd_nanos(midnight.mjd(), -NANOS_PER_SEC).unwrap();
        assert_eq!(Gregorian(2016, 12, 30), prev.date());
        assert_eq!(SECS_PER_DAY - 1, prev.seconds_of_day());
        assert!(prev < midnight && midnight < next);
    }

    #[test]
    fn shift() {
        let t = UtcTime::from(Gregorian(2020, 3, 15));
        let t = t.add_seconds(-2 * 3600).unwrap();
        assert_eq!("2020-03-14 22:00:00+00:00", t.to_string());
        let last = UtcTime::from(Gregorian(9999, 12, 31));
        assert!(matches!(last.add_seconds(SECS_PER_DAY), Err(Error::Range(_))));
        assert!(matches!(t.add_seconds(i64::MAX), Err(Error::Range(_))));
        assert!(matches!(t.add_seconds(i64::MIN), Err(Error::Range(_))));
        let back = t.add_seconds(-SECS_PER_DAY * 365).unwrap();
        assert_eq!("2019-03-15 22:00:00+00:00", back.to_string());
    }

    #[test]
    fn now() {
        let now = UtcTime::now().unwrap();
        assert!(now.date() > Gregorian(2020, 1, 1));
    }
}
