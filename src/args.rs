// work out which instant the command line asks about

use tracing::info;

use crate::date::*;
use crate::gpstime::*;
use crate::parse;

/// With no arguments, the system clock. With one, Unix time in
/// milliseconds. With two, a date and a time of day.
pub fn instant<S: AsRef<str>>(args: &[S]) -> Result<UtcTime> {
    match args {
        [] => {
            info!(
                "no time given, using the system clock; to specify another \
                 time, give Unix time in milliseconds or a UTC date and time \
                 like YYYY-MM-DD HH:MM:SS"
            );
            UtcTime::now()
        }
        [millis] => {
            let millis = millis.as_ref();
            info!("one argument, assuming Unix time in milliseconds");
            match millis.parse::<i64>() {
                Ok(ms) => UtcTime::from_unix_millis(ms),
                Err(err) => Err(Error::Millis(millis.to_owned(), err)),
            }
        }
        [date, time] => {
            let (date, time) = (date.as_ref(), time.as_ref());
            if !time.contains(':') {
                return Err(Error::NotATime(time.to_owned()));
            }
            parse::parse(&format!("{} {}", date, time))
        }
        _ => Err(Error::Args(args.len())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test() {
        let utc = instant(&["1584273600000"]).unwrap();
        assert_eq!("2020-03-15 12:00:00+00:00", utc.to_string());
        let utc = instant(&["2020-03-15", "12:00:00"]).unwrap();
        assert_eq!("2020-03-15 12:00:00+00:00", utc.to_string());
        let utc = instant(&["2020-03-15", "14:00:00+02:00"]).unwrap();
        assert_eq!("2020-03-15 12:00:00+00:00", utc.to_string());
        let utc = instant(&["-1000"]).unwrap();
        assert_eq!("1969-12-31 23:59:59+00:00", utc.to_string());
        let empty: &[&str] = &[];
        assert!(instant(empty).is_ok());
    }

    #[test]
    fn errors() {
        assert!(matches!(
            instant(&["2020-03-15", "120000"]),
            Err(Error::NotATime(time)) if time == "120000"
        ));
        assert!(matches!(instant(&["noon"]), Err(Error::Millis(..))));
        assert!(matches!(instant(&["1.5e12"]), Err(Error::Millis(..))));
        assert!(matches!(instant(&["2020-03-15", "12:00"]), Err(Error::Nom(_))));
        assert!(matches!(instant(&["a", "b", "c"]), Err(Error::Args(3))));
    }

    #[test]
    fn epoch_millis() {
        let unix = instant(&["0"]).unwrap();
        assert!(matches!(
            GpsTime::try_from(unix),
            Err(Error::BeforeEpoch(_))
        ));
        let gps = GpsTime::try_from(instant(&["315964800000"]).unwrap()).unwrap();
        assert_eq!((0, 0), (gps.week(), gps.nanos_of_week()));
    }
}
