// parse `YYYY-MM-DD HH:MM:SS` with optional fraction and UTC offset

use nom::branch::*;
use nom::bytes::complete::*;
use nom::character::complete::*;
use nom::combinator::*;
use nom::error::{context, VerboseError, VerboseErrorKind};
use nom::sequence::*;
use std::str::FromStr;

use crate::date::*;
use crate::gpstime::Error;

type Result<'a, O> = nom::IResult<&'a str, O, VerboseError<&'a str>>;

// fields as written, before range checks
#[derive(Clone, Debug, Eq, PartialEq)]
struct Unchecked {
    date: Gregorian,
    hour: i32,
    min: i32,
    sec: i32,
    nanos: i64,
    offset: Option<(i32, i32, i32)>,
}

fn num<'a>(min: usize, max: usize) -> impl FnMut(&'a str) -> Result<'a, i32> {
    map_res(
        take_while_m_n(min, max, |c: char| c.is_ascii_digit()),
        i32::from_str,
    )
}

fn fraction<'a>(input: &'a str) -> Result<'a, i64> {
    // nanosecond resolution, further digits are dropped
    map(preceded(char('.'), digit1), |digits: &str| {
        digits
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(9)
            .fold(0, |n, b| n * 10 + i64::from(b - b'0'))
    })(input)
}

fn date<'a>(input: &'a str) -> Result<'a, Gregorian> {
    context(
        "date",
        map(
            tuple((
                num(4, 4),
                preceded(char('-'), num(1, 2)),
                preceded(char('-'), num(1, 2)),
            )),
            |(y, m, d)| Gregorian(y, m, d),
        ),
    )(input)
}

fn time<'a>(input: &'a str) -> Result<'a, (i32, i32, i32, i64)> {
    context(
        "time",
        map(
            tuple((
                num(1, 2),
                preceded(char(':'), num(1, 2)),
                preceded(char(':'), num(1, 2)),
                opt(fraction),
            )),
            |(h, m, s, nanos)| (h, m, s, nanos.unwrap_or(0)),
        ),
    )(input)
}

fn offset<'a>(input: &'a str) -> Result<'a, (i32, i32, i32)> {
    context(
        "offset",
        alt((
            value((1, 0, 0), char('Z')),
            tuple((
                alt((value(1, char('+')), value(-1, char('-')))),
                num(2, 2),
                preceded(opt(char(':')), num(2, 2)),
            )),
        )),
    )(input)
}

fn datetime<'a>(input: &'a str) -> Result<'a, Unchecked> {
    map(
        all_consuming(tuple((
            date,
            preceded(alt((space1, tag("T"))), time),
            opt(offset),
        ))),
        |(date, (hour, min, sec, nanos), offset)| Unchecked {
            date,
            hour,
            min,
            sec,
            nanos,
            offset,
        },
    )(input)
}

impl Unchecked {
    fn check(self) -> crate::Result<UtcTime> {
        let utc = UtcTime::from_gregorian(
            self.date, self.hour, self.min, self.sec, self.nanos,
        )?;
        match self.offset {
            None => Ok(utc),
            Some((sign, hh, mm)) if hh < 24 && mm < 60 => {
                let east = i64::from(sign) * i64::from(hh * 3600 + mm * 60);
                utc.add_seconds(-east)
            }
            Some((_, hh, mm)) => Err(Error::Offset(hh, mm)),
        }
    }
}

fn report(text: &str, err: VerboseError<&str>) -> Error {
    let mut detail = Vec::new();
    for (rest, kind) in err.errors {
        let at = text.len().saturating_sub(rest.len());
        detail.push(match kind {
            VerboseErrorKind::Char(c) => format!("expected '{}' at {}", c, at),
            VerboseErrorKind::Context(what) => format!("in {} at {}", what, at),
            VerboseErrorKind::Nom(kind) => {
                format!("{} at {}", kind.description(), at)
            }
        });
    }
    Error::Nom(format!("{:?}: {}", text, detail.join(", ")))
}

/// Parse a UTC date and time of day, such as `2020-03-15 12:00:00`.
///
/// A `T` may separate the date and time. Seconds may have a decimal
/// fraction. A trailing `Z` or `+HH:MM` / `-HHMM` offset is removed to
/// give UTC; without one the time is taken to be UTC already.
pub fn parse(text: &str) -> crate::Result<UtcTime> {
    match datetime(text) {
        Ok((_, unchecked)) => unchecked.check(),
        Err(nom::Err::Error(err)) => Err(report(text, err)),
        Err(nom::Err::Failure(err)) => Err(report(text, err)),
        Err(nom::Err::Incomplete(_)) => {
            Err(Error::Nom(format!("{:?}: incomplete", text)))
        }
    }
}
