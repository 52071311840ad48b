/*
 *  platform/clock.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock sources
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use chrono::{Local, NaiveDateTime, TimeDelta};
use std::sync::{Mutex, PoisonError};

use super::Clock;

/// Local time of the host
#[derive(Debug, Clone)]
pub struct SystemClock {
    is_24h: bool,
}

impl SystemClock {
    pub fn new(is_24h: bool) -> Self {
        Self { is_24h }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn is_24h_style(&self) -> bool {
        self.is_24h
    }
}

/// Clock that only moves when told to, for tests and demos
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
    is_24h: bool,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime, is_24h: bool) -> Self {
        Self { now: Mutex::new(now), is_24h }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_24h_style(&self) -> bool {
        self.is_24h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    #[test]
    fn test_fixed_clock_reading() {
        let t = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap().and_hms_opt(9, 5, 30).unwrap();
        let clock = FixedClock::new(t, false);
        let reading = clock.reading();
        assert_eq!((reading.hour, reading.minute), (9, 5));
        assert_eq!(reading.weekday, Weekday::Thu);
        assert!(!clock.is_24h_style());

        clock.advance(TimeDelta::minutes(55));
        assert_eq!(clock.reading().hour, 10);
        assert_eq!(clock.reading().minute, 0);
    }

    #[test]
    fn test_system_clock_style() {
        assert!(SystemClock::new(true).is_24h_style());
        assert!(!SystemClock::new(false).is_24h_style());
    }
}
