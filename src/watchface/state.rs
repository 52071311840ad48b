/*
 *  watchface/state.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Watchface state machine: events in, changed regions out
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

use arrayvec::ArrayVec;
use log::debug;

use super::event::WatchEvent;
use crate::display::error::DisplayError;
use crate::display::layout_manager::LayoutManager;
use crate::display::region::RegionKind;
use crate::format::{format_battery, format_date, format_time, format_year, ChargeLevel, ClockReading, HourStyle};

/// Regions that need redrawing after an event
pub type RegionChanges = ArrayVec<RegionKind, 4>;

/// Add `kind` unless already listed
pub fn mark(changes: &mut RegionChanges, kind: RegionKind) {
    if !changes.contains(&kind) {
        changes.push(kind);
    }
}

#[derive(Debug)]
pub struct WatchfaceState {
    layout: LayoutManager,
    hour_style: HourStyle,
}

impl WatchfaceState {
    pub fn new(hour_style: HourStyle) -> Self {
        Self { layout: LayoutManager::new(), hour_style }
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    /// Apply one event
    ///
    /// Ticks and battery changes while no window is shown are dropped.
    /// Showing twice or hiding while hidden is an error and changes nothing.
    pub fn handle(&mut self, event: WatchEvent) -> Result<RegionChanges, DisplayError> {
        let mut changes = RegionChanges::new();
        match event {
            WatchEvent::WindowShown(bounds) => {
                self.layout.init_regions(bounds)?;
                changes.extend(RegionKind::ALL);
            }
            WatchEvent::WindowHidden => {
                self.layout.teardown()?;
            }
            WatchEvent::Tick(reading) => {
                if !self.layout.is_present() {
                    debug!("Tick with no window shown, dropped");
                    return Ok(changes);
                }
                self.apply_clock(&reading, &mut changes)?;
            }
            WatchEvent::BatteryChanged(level) => {
                if !self.layout.is_present() {
                    debug!("Battery change with no window shown, dropped");
                    return Ok(changes);
                }
                self.apply_battery(level, &mut changes)?;
            }
        }
        Ok(changes)
    }

    fn apply_clock(&mut self, reading: &ClockReading, changes: &mut RegionChanges) -> Result<(), DisplayError> {
        let time = format_time(reading, self.hour_style);
        if self.layout.set_text(RegionKind::Time, &time)? {
            mark(changes, RegionKind::Time);
        }
        let date = format_date(reading);
        if self.layout.set_text(RegionKind::Date, &date)? {
            mark(changes, RegionKind::Date);
        }
        let year = format_year(reading);
        if self.layout.set_text(RegionKind::Year, &year)? {
            mark(changes, RegionKind::Year);
        }
        Ok(())
    }

    fn apply_battery(&mut self, level: ChargeLevel, changes: &mut RegionChanges) -> Result<(), DisplayError> {
        let battery = format_battery(level.percent());
        let relabelled = self.layout.set_text(RegionKind::Battery, &battery.label)?;
        let resized = self.layout.set_battery_width(battery.level)?;
        if relabelled || resized {
            mark(changes, RegionKind::Battery);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ScreenBounds;
    use chrono::NaiveDate;

    const SCREEN: ScreenBounds = ScreenBounds::new(144, 168);

    fn reading(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> ClockReading {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap().into()
    }

    fn text(state: &WatchfaceState, kind: RegionKind) -> String {
        state.layout().region(kind).unwrap().text().to_string()
    }

    #[test]
    fn test_shown_marks_everything() {
        let mut state = WatchfaceState::new(HourStyle::TwentyFourHour);
        let changes = state.handle(WatchEvent::WindowShown(SCREEN)).unwrap();
        assert_eq!(changes.as_slice(), &RegionKind::ALL);
    }

    #[test]
    fn test_tick_updates_texts() {
        let mut state = WatchfaceState::new(HourStyle::TwentyFourHour);
        state.handle(WatchEvent::WindowShown(SCREEN)).unwrap();

        let changes = state.handle(WatchEvent::Tick(reading(2024, 7, 4, 9, 5))).unwrap();
        assert_eq!(changes.as_slice(), &[RegionKind::Time, RegionKind::Date, RegionKind::Year]);
        assert_eq!(text(&state, RegionKind::Time), "09:05");
        assert_eq!(text(&state, RegionKind::Date), "Thu 04 Jul");
        assert_eq!(text(&state, RegionKind::Year), "2024");

        // next minute, same day
        let changes = state.handle(WatchEvent::Tick(reading(2024, 7, 4, 9, 6))).unwrap();
        assert_eq!(changes.as_slice(), &[RegionKind::Time]);
    }

    #[test]
    fn test_twelve_hour_style() {
        let mut state = WatchfaceState::new(HourStyle::TwelveHour);
        state.handle(WatchEvent::WindowShown(SCREEN)).unwrap();
        state.handle(WatchEvent::Tick(reading(2024, 7, 4, 0, 7))).unwrap();
        assert_eq!(text(&state, RegionKind::Time), "12:07");
        state.handle(WatchEvent::Tick(reading(2024, 7, 4, 21, 7))).unwrap();
        assert_eq!(text(&state, RegionKind::Time), "09:07");
    }

    #[test]
    fn test_battery_change() {
        let mut state = WatchfaceState::new(HourStyle::TwentyFourHour);
        state.handle(WatchEvent::WindowShown(SCREEN)).unwrap();

        let changes = state.handle(WatchEvent::BatteryChanged(ChargeLevel::new(87))).unwrap();
        assert_eq!(changes.as_slice(), &[RegionKind::Battery]);
        assert_eq!(text(&state, RegionKind::Battery), "87%");
        assert_eq!(state.layout().region(RegionKind::Battery).unwrap().width(), 125);

        let changes = state.handle(WatchEvent::BatteryChanged(ChargeLevel::new(87))).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_events_without_window_are_dropped() {
        let mut state = WatchfaceState::new(HourStyle::TwentyFourHour);
        assert!(state.handle(WatchEvent::Tick(reading(2024, 7, 4, 9, 5))).unwrap().is_empty());
        assert!(state.handle(WatchEvent::BatteryChanged(ChargeLevel::EMPTY)).unwrap().is_empty());
        assert!(!state.layout().is_present());
    }

    #[test]
    fn test_contract_violations() {
        let mut state = WatchfaceState::new(HourStyle::TwentyFourHour);
        assert!(matches!(state.handle(WatchEvent::WindowHidden), Err(DisplayError::RegionsAbsent)));

        state.handle(WatchEvent::WindowShown(SCREEN)).unwrap();
        state.handle(WatchEvent::Tick(reading(2024, 7, 4, 9, 5))).unwrap();
        assert!(matches!(
            state.handle(WatchEvent::WindowShown(SCREEN)),
            Err(DisplayError::RegionsAlreadyPresent)
        ));
        // existing regions untouched
        assert_eq!(text(&state, RegionKind::Time), "09:05");
    }

    #[test]
    fn test_hide_then_show_starts_fresh() {
        let mut state = WatchfaceState::new(HourStyle::TwentyFourHour);
        state.handle(WatchEvent::WindowShown(SCREEN)).unwrap();
        state.handle(WatchEvent::Tick(reading(2024, 7, 4, 9, 5))).unwrap();
        state.handle(WatchEvent::WindowHidden).unwrap();
        assert!(!state.layout().is_present());

        state.handle(WatchEvent::WindowShown(SCREEN)).unwrap();
        assert_eq!(text(&state, RegionKind::Time), "");
        assert_eq!(text(&state, RegionKind::Year), "1900");
    }
}
