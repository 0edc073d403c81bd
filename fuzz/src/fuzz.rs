#![no_main]
use gpstime::{parse, Error, GpsTime, UtcTime, SECS_PER_WEEK};
use libfuzzer_sys::fuzz_target;
use std::convert::TryFrom;

// any instant that converts must land inside its week
fn convert(utc: UtcTime) {
    let text = utc.to_string();
    match GpsTime::try_from(utc) {
        Ok(gps) => {
            let tow = gps.seconds_of_week();
            assert!(0.0 <= tow && tow < SECS_PER_WEEK as f64, "{}", text);
            let _ = gps.to_string();
        }
        Err(Error::BeforeEpoch(_)) => (),
        Err(err) => panic!("\ninput {}\nerror {}\n", text, err),
    }
}

fn fuzz_millis(data: &[u8]) {
    let bytes: [u8; 8] = match data.get(..8).map(<[u8; 8]>::try_from) {
        Some(Ok(bytes)) => bytes,
        _ => return,
    };
    match UtcTime::from_unix_millis(i64::from_le_bytes(bytes)) {
        Ok(utc) => convert(utc),
        Err(Error::Range(_)) => (),
        Err(err) => panic!("\ninput {:?}\nerror {}\n", bytes, err),
    }
}

fn fuzz_text(data: &[u8]) {
    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        Err(_) => return,
    };
    if let Ok(utc) = parse::parse(text) {
        // the canonical form must parse back to the same instant
        let again = parse::parse(&utc.to_string()).unwrap();
        assert_eq!(utc.mjd(), again.mjd(), "{}", text);
        assert_eq!(utc.seconds_of_day(), again.seconds_of_day(), "{}", text);
        convert(utc);
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 1 {
        return;
    }
    let rest = &data[1..];
    match data[0] {
        0 => fuzz_millis(rest),
        1 => fuzz_text(rest),
        _ => (),
    }
});
