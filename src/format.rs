/*
 *  format.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display string formatting for the watchface regions
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

use arrayvec::ArrayString;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use core::fmt::Write;

/// Capacity of the time text ("HH:MM")
pub const TIME_TEXT_MAX: usize = 8;

/// Capacity of the date text ("Thu 04 Jul")
pub const DATE_TEXT_MAX: usize = 24;

/// Capacity of the year text ("2024")
pub const YEAR_TEXT_MAX: usize = 5;

/// Capacity of the battery label ("100%")
pub const BATTERY_TEXT_MAX: usize = 5;

pub type TimeText = ArrayString<TIME_TEXT_MAX>;
pub type DateText = ArrayString<DATE_TEXT_MAX>;
pub type YearText = ArrayString<YEAR_TEXT_MAX>;
pub type BatteryLabel = ArrayString<BATTERY_TEXT_MAX>;

const WEEKDAY_ABBREV: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 12 or 24 hour clock presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourStyle {
    TwelveHour,
    TwentyFourHour,
}

impl HourStyle {
    pub fn from_24h(is_24h: bool) -> Self {
        if is_24h { HourStyle::TwentyFourHour } else { HourStyle::TwelveHour }
    }
}

/// Broken-down local time, as delivered with every minute tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// 0-23
    pub hour: u32,
    /// 0-59
    pub minute: u32,
    pub weekday: Weekday,
    /// 1-31
    pub day: u32,
    /// 1-12
    pub month: u32,
    pub year: i32,
}

impl ClockReading {
    pub fn from_datetime<T: Datelike + Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            weekday: t.weekday(),
            day: t.day(),
            month: t.month(),
            year: t.year(),
        }
    }
}

impl From<NaiveDateTime> for ClockReading {
    fn from(t: NaiveDateTime) -> Self {
        Self::from_datetime(&t)
    }
}

/// Battery charge in percent, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChargeLevel(u8);

impl ChargeLevel {
    pub const EMPTY: ChargeLevel = ChargeLevel(0);
    pub const FULL: ChargeLevel = ChargeLevel(100);

    /// Values above 100 are clamped
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn fraction(self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// floor(width * percent / 100)
    pub fn scale(self, width: u32) -> u32 {
        (width as u64 * self.0 as u64 / 100) as u32
    }
}

impl Default for ChargeLevel {
    fn default() -> Self {
        ChargeLevel::FULL
    }
}

/// Battery label plus the level it was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryText {
    pub label: BatteryLabel,
    pub level: ChargeLevel,
}

impl BatteryText {
    pub fn width_fraction(&self) -> f32 {
        self.level.fraction()
    }

    /// Bar width for a region that is `full_width` wide at 100%
    pub fn bar_width(&self, full_width: u32) -> u32 {
        self.level.scale(full_width)
    }
}

fn overflowed(what: &str, capacity: usize) {
    log::warn!("{} text exceeded {} characters and was truncated", what, capacity);
}

/// "HH:MM" or "hh:mm", no AM/PM marker
pub fn format_time(reading: &ClockReading, style: HourStyle) -> TimeText {
    let hour = match style {
        HourStyle::TwentyFourHour => reading.hour % 24,
        HourStyle::TwelveHour => match reading.hour % 12 {
            0 => 12,
            h => h,
        },
    };

    let mut text = TimeText::new();
    if write!(text, "{:02}:{:02}", hour, reading.minute % 60).is_err() {
        overflowed("time", TIME_TEXT_MAX);
    }
    text
}

/// "Thu 04 Jul"
pub fn format_date(reading: &ClockReading) -> DateText {
    let weekday = WEEKDAY_ABBREV[reading.weekday.num_days_from_monday() as usize];
    let month = MONTH_ABBREV[(reading.month.clamp(1, 12) - 1) as usize];

    let mut text = DateText::new();
    if write!(text, "{} {:02} {}", weekday, reading.day, month).is_err() {
        overflowed("date", DATE_TEXT_MAX);
    }
    text
}

pub fn format_year(reading: &ClockReading) -> YearText {
    let mut text = YearText::new();
    if write!(text, "{:04}", reading.year).is_err() {
        overflowed("year", YEAR_TEXT_MAX);
    }
    text
}

/// "<percent>%" and the proportional bar width
pub fn format_battery(percent: u8) -> BatteryText {
    let level = ChargeLevel::new(percent);
    let mut label = BatteryLabel::new();
    if write!(label, "{}%", level.percent()).is_err() {
        overflowed("battery", BATTERY_TEXT_MAX);
    }
    BatteryText { label, level }
}
