/*
 *  watchface/event.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Events delivered to the watchface state machine
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

use crate::display::ScreenBounds;
use crate::format::{ChargeLevel, ClockReading};

/// Everything the platform tells the watchface
///
/// Events are processed one at a time, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// Window became visible with this root size
    WindowShown(ScreenBounds),

    /// Window is going away; regions must be released
    WindowHidden,

    /// Local time crossed into a new minute
    Tick(ClockReading),

    /// Reported charge changed
    BatteryChanged(ChargeLevel),
}
