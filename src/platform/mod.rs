/*
 *  platform/mod.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host platform services: wall clock, battery and their subscriptions
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

use chrono::NaiveDateTime;

use crate::format::{ChargeLevel, ClockReading};

pub mod battery;
pub mod clock;
pub mod tick;

pub use battery::{subscribe_battery, FixedBattery, SysfsBattery};
pub use clock::{FixedClock, SystemClock};
pub use tick::{subscribe_minutes, until_next_minute};

/// Local wall clock
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Platform preference for 24-hour time
    fn is_24h_style(&self) -> bool;

    fn reading(&self) -> ClockReading {
        ClockReading::from(self.now())
    }
}

/// Battery charge state service
pub trait BatteryMonitor: Send + Sync {
    /// Current charge; never fails, a source that cannot be read reports
    /// its last known value
    fn peek(&self) -> ChargeLevel;
}
