/*
 *  display/layout_manager.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layout manager - creates, owns and mutates the watchface regions
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

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::mono_font::ascii::{FONT_6X13, FONT_9X18_BOLD, FONT_10X20};
use embedded_graphics::primitives::Rectangle;
use embedded_text::alignment::HorizontalAlignment;
use log::debug;

use super::color::Color;
use super::error::DisplayError;
use super::region::{Region, RegionKind, RegionSet};
use super::ScreenBounds;
use crate::format::ChargeLevel;

pub const DATE_HEIGHT: u32 = 36;
pub const TIME_HEIGHT: u32 = 42;
/// Time band top sits this far above the vertical midpoint
pub const TIME_MIDPOINT_OFFSET: i32 = 32;
pub const YEAR_HEIGHT: u32 = 44;
pub const BATTERY_HEIGHT: u32 = 18;

/// Smallest screen on which the four bands do not overlap
pub const MIN_SCREEN_HEIGHT: u32 = 144;

pub const DATE_PLACEHOLDER: &str = "Mon 4 Jul";
pub const YEAR_PLACEHOLDER: &str = "1900";
pub const BATTERY_PLACEHOLDER: &str = "100%";

/// Layout manager - owns the regions while the window is shown
///
/// Two states: absent (no window) and present. `init_regions` moves
/// absent -> present, `teardown` present -> absent. Anything else in the
/// wrong state is rejected and leaves the state untouched.
#[derive(Debug, Default)]
pub struct LayoutManager {
    regions: Option<RegionSet>,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self { regions: None }
    }

    pub fn is_present(&self) -> bool {
        self.regions.is_some()
    }

    pub fn regions(&self) -> Option<&RegionSet> {
        self.regions.as_ref()
    }

    pub fn region(&self, kind: RegionKind) -> Option<&Region> {
        self.regions.as_ref().map(|set| set.get(kind))
    }

    /// Compute the four regions for a screen without taking ownership of them
    pub fn build(bounds: ScreenBounds) -> Result<RegionSet, DisplayError> {
        if bounds.width == 0 || bounds.height < MIN_SCREEN_HEIGHT {
            return Err(DisplayError::InvalidConfiguration(format!(
                "screen {}x{} too small, need width > 0 and height >= {}",
                bounds.width, bounds.height, MIN_SCREEN_HEIGHT
            )));
        }

        let width = bounds.width;
        let height = bounds.height as i32;

        let time_y = height / 2 - TIME_MIDPOINT_OFFSET;
        let battery_y = height - BATTERY_HEIGHT as i32;
        let year_y = battery_y - YEAR_HEIGHT as i32;

        let time = Region::new_text(
            RegionKind::Time,
            Rectangle::new(Point::new(0, time_y), Size::new(width, TIME_HEIGHT)),
            &FONT_10X20,
        )
        .align(HorizontalAlignment::Center)
        .colors(Color::Black, None);

        let date = Region::new_text(
            RegionKind::Date,
            Rectangle::new(Point::zero(), Size::new(width, DATE_HEIGHT)),
            &FONT_9X18_BOLD,
        )
        .align(HorizontalAlignment::Center)
        .colors(Color::White, Some(Color::LightGray))
        .with_text(DATE_PLACEHOLDER);

        let year = Region::new_text(
            RegionKind::Year,
            Rectangle::new(Point::new(0, year_y), Size::new(width, YEAR_HEIGHT)),
            &FONT_9X18_BOLD,
        )
        .align(HorizontalAlignment::Center)
        .colors(Color::White, Some(Color::LightGray))
        .with_text(YEAR_PLACEHOLDER);

        let battery = Region::new_text(
            RegionKind::Battery,
            Rectangle::new(Point::new(0, battery_y), Size::new(width, BATTERY_HEIGHT)),
            &FONT_6X13,
        )
        .align(HorizontalAlignment::Center)
        .colors(Color::White, Some(Color::Black))
        .with_text(BATTERY_PLACEHOLDER);

        Ok(RegionSet::new(bounds, [time, date, year, battery]))
    }

    /// Create the regions for a newly shown window
    pub fn init_regions(&mut self, bounds: ScreenBounds) -> Result<&RegionSet, DisplayError> {
        if self.regions.is_some() {
            return Err(DisplayError::RegionsAlreadyPresent);
        }
        let set = Self::build(bounds)?;
        debug!("Regions created for {}x{} screen", bounds.width, bounds.height);
        Ok(self.regions.insert(set))
    }

    /// Replace a region's text; Ok(false) when nothing changed
    pub fn set_text(&mut self, kind: RegionKind, text: &str) -> Result<bool, DisplayError> {
        let set = self.regions.as_mut().ok_or(DisplayError::RegionsAbsent)?;
        Ok(set.get_mut(kind).set_text(text))
    }

    /// Scale the battery bar to `level` of the screen width
    pub fn set_battery_width(&mut self, level: ChargeLevel) -> Result<bool, DisplayError> {
        let set = self.regions.as_mut().ok_or(DisplayError::RegionsAbsent)?;
        let width = level.scale(set.bounds().width);
        Ok(set
            .get_mut(RegionKind::Battery)
            .resize(Size::new(width, BATTERY_HEIGHT)))
    }

    /// Release the regions of a hidden window
    pub fn teardown(&mut self) -> Result<(), DisplayError> {
        match self.regions.take() {
            Some(_) => {
                debug!("Regions released");
                Ok(())
            }
            None => Err(DisplayError::RegionsAbsent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEBBLE: ScreenBounds = ScreenBounds { width: 144, height: 168 };

    #[test]
    fn test_region_placement() {
        let set = LayoutManager::build(PEBBLE).unwrap();

        let date = set.get(RegionKind::Date);
        assert_eq!(date.bounds, Rectangle::new(Point::new(0, 0), Size::new(144, 36)));

        let time = set.get(RegionKind::Time);
        assert_eq!(time.bounds, Rectangle::new(Point::new(0, 52), Size::new(144, 42)));

        let year = set.get(RegionKind::Year);
        assert_eq!(year.bounds, Rectangle::new(Point::new(0, 106), Size::new(144, 44)));

        let battery = set.get(RegionKind::Battery);
        assert_eq!(battery.bounds, Rectangle::new(Point::new(0, 150), Size::new(144, 18)));
    }

    #[test]
    fn test_regions_do_not_overlap() {
        for (w, h) in [(144, 168), (180, 180), (200, 228), (144, 144)] {
            let set = LayoutManager::build(ScreenBounds::new(w, h)).unwrap();
            let regions: Vec<&Region> = set.iter().collect();
            for (i, a) in regions.iter().enumerate() {
                for b in &regions[i + 1..] {
                    let overlap = a.bounds.intersection(&b.bounds);
                    assert_eq!(overlap.size.width * overlap.size.height, 0,
                        "{:?} overlaps {:?} on {}x{}", a.kind, b.kind, w, h);
                }
            }
        }
    }

    #[test]
    fn test_placeholders() {
        let set = LayoutManager::build(PEBBLE).unwrap();
        assert_eq!(set.get(RegionKind::Time).text(), "");
        assert_eq!(set.get(RegionKind::Date).text(), DATE_PLACEHOLDER);
        assert_eq!(set.get(RegionKind::Year).text(), YEAR_PLACEHOLDER);
        assert_eq!(set.get(RegionKind::Battery).text(), BATTERY_PLACEHOLDER);
    }

    #[test]
    fn test_visual_styles() {
        let set = LayoutManager::build(PEBBLE).unwrap();
        let time = set.get(RegionKind::Time);
        assert_eq!((time.fg_color, time.bg_color), (Color::Black, None));
        let date = set.get(RegionKind::Date);
        assert_eq!((date.fg_color, date.bg_color), (Color::White, Some(Color::LightGray)));
        let battery = set.get(RegionKind::Battery);
        assert_eq!((battery.fg_color, battery.bg_color), (Color::White, Some(Color::Black)));
        assert!(set.iter().all(|r| r.alignment == HorizontalAlignment::Center));
    }

    #[test]
    fn test_state_machine() {
        let mut manager = LayoutManager::new();
        assert!(!manager.is_present());
        assert!(matches!(manager.teardown(), Err(DisplayError::RegionsAbsent)));
        assert!(matches!(manager.set_text(RegionKind::Time, "09:05"), Err(DisplayError::RegionsAbsent)));

        manager.init_regions(PEBBLE).unwrap();
        assert!(manager.is_present());
        assert!(matches!(manager.init_regions(PEBBLE), Err(DisplayError::RegionsAlreadyPresent)));

        manager.teardown().unwrap();
        assert!(!manager.is_present());
        assert!(manager.regions().is_none());
    }

    #[test]
    fn test_set_text_idempotent() {
        let mut manager = LayoutManager::new();
        manager.init_regions(PEBBLE).unwrap();
        assert!(manager.set_text(RegionKind::Time, "09:05").unwrap());
        assert!(!manager.set_text(RegionKind::Time, "09:05").unwrap());
        assert_eq!(manager.region(RegionKind::Time).unwrap().text(), "09:05");
    }

    #[test]
    fn test_battery_width() {
        let mut manager = LayoutManager::new();
        manager.init_regions(PEBBLE).unwrap();

        assert!(manager.set_battery_width(ChargeLevel::new(87)).unwrap());
        let battery = manager.region(RegionKind::Battery).unwrap();
        assert_eq!(battery.width(), 125);
        assert_eq!(battery.height(), BATTERY_HEIGHT);
        assert_eq!(battery.position(), Point::new(0, 150));

        manager.set_battery_width(ChargeLevel::EMPTY).unwrap();
        assert_eq!(manager.region(RegionKind::Battery).unwrap().width(), 0);

        manager.set_battery_width(ChargeLevel::FULL).unwrap();
        assert_eq!(manager.region(RegionKind::Battery).unwrap().width(), 144);
        assert!(!manager.set_battery_width(ChargeLevel::FULL).unwrap());
    }

    #[test]
    fn test_rejects_small_screen() {
        let mut manager = LayoutManager::new();
        assert!(matches!(
            manager.init_regions(ScreenBounds::new(128, 64)),
            Err(DisplayError::InvalidConfiguration(_))
        ));
        assert!(!manager.is_present());
    }
}
