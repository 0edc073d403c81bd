pub mod args;
pub mod date;
pub mod gpstime;
pub mod leap;
pub mod parse;

pub use crate::date::{Gregorian, UtcTime, MJD};
pub use crate::gpstime::*;
pub use crate::leap::*;
