//! Implements Clock with the local system time.

use crate::ports::Clock;
use chrono::{Local, NaiveDateTime};

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
