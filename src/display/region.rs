/*
 *  display/region.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Text regions and the fixed region set of the watchface window
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
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::primitives::Rectangle;
use embedded_text::alignment::HorizontalAlignment;

use super::color::Color;
use super::ScreenBounds;
use crate::format::DATE_TEXT_MAX;

/// Largest text any region holds (the date)
pub const REGION_TEXT_MAX: usize = DATE_TEXT_MAX;

pub type RegionText = ArrayString<REGION_TEXT_MAX>;

/// The four regions of the watchface, in composition order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Time,
    Date,
    Year,
    Battery,
}

impl RegionKind {
    /// Composition order: later regions draw over earlier ones
    pub const ALL: [RegionKind; 4] = [
        RegionKind::Time,
        RegionKind::Date,
        RegionKind::Year,
        RegionKind::Battery,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RegionKind::Time => "time",
            RegionKind::Date => "date",
            RegionKind::Year => "year",
            RegionKind::Battery => "battery",
        }
    }
}

/// A rectangular display area holding one piece of text
#[derive(Debug, Clone)]
pub struct Region {
    pub kind: RegionKind,

    /// Bounding rectangle (x, y, width, height)
    pub bounds: Rectangle,

    pub font: &'static MonoFont<'static>,

    pub fg_color: Color,

    /// None is transparent: the window background shows through
    pub bg_color: Option<Color>,

    pub alignment: HorizontalAlignment,

    text: RegionText,
}

impl Region {
    /// Create a new text region, left aligned, white on transparent
    pub fn new_text(kind: RegionKind, bounds: Rectangle, font: &'static MonoFont<'static>) -> Self {
        Self {
            kind,
            bounds,
            font,
            fg_color: Color::White,
            bg_color: None,
            alignment: HorizontalAlignment::Left,
            text: RegionText::new(),
        }
    }

    /// Builder: set alignment
    pub fn align(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder: set colors
    pub fn colors(mut self, fg: Color, bg: Option<Color>) -> Self {
        self.fg_color = fg;
        self.bg_color = bg;
        self
    }

    /// Builder: initial text
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Replace the text; returns false when it was already `text`
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text.as_str() == text {
            return false;
        }
        self.text.clear();
        for ch in text.chars() {
            if self.text.try_push(ch).is_err() {
                log::warn!("{} region text truncated to {} bytes", self.kind.name(), REGION_TEXT_MAX);
                break;
            }
        }
        true
    }

    /// Resize in place keeping the origin; returns false when unchanged
    pub fn resize(&mut self, size: Size) -> bool {
        if self.bounds.size == size {
            return false;
        }
        self.bounds.size = size;
        true
    }

    pub fn width(&self) -> u32 {
        self.bounds.size.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.size.height
    }

    pub fn position(&self) -> Point {
        self.bounds.top_left
    }
}

/// All four regions of a shown window
#[derive(Debug, Clone)]
pub struct RegionSet {
    bounds: ScreenBounds,
    regions: [Region; 4],
}

impl RegionSet {
    /// `regions` must be given in `RegionKind::ALL` order
    pub(crate) fn new(bounds: ScreenBounds, regions: [Region; 4]) -> Self {
        debug_assert!(regions.iter().zip(RegionKind::ALL).all(|(r, k)| r.kind == k));
        Self { bounds, regions }
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    pub fn get(&self, kind: RegionKind) -> &Region {
        &self.regions[kind.index()]
    }

    pub fn get_mut(&mut self, kind: RegionKind) -> &mut Region {
        &mut self.regions[kind.index()]
    }

    /// Regions in composition order
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    fn region() -> Region {
        Region::new_text(
            RegionKind::Date,
            Rectangle::new(Point::zero(), Size::new(144, 36)),
            &FONT_6X10,
        )
    }

    #[test]
    fn test_set_text_reports_change() {
        let mut r = region();
        assert!(r.set_text("Thu 04 Jul"));
        assert!(!r.set_text("Thu 04 Jul"));
        assert_eq!(r.text(), "Thu 04 Jul");
        assert!(r.set_text("Fri 05 Jul"));
    }

    #[test]
    fn test_set_text_truncates_long_text() {
        let mut r = region();
        r.set_text("abcdefghijklmnopqrstuvwxyz0123");
        assert_eq!(r.text().len(), REGION_TEXT_MAX);
        assert!(r.text().starts_with("abcdefghijklmnopqrstuvwx"));
    }

    #[test]
    fn test_resize_keeps_origin() {
        let mut r = region();
        assert!(r.resize(Size::new(72, 36)));
        assert!(!r.resize(Size::new(72, 36)));
        assert_eq!(r.position(), Point::zero());
        assert_eq!(r.width(), 72);
        assert_eq!(r.height(), 36);
    }

    #[test]
    fn test_builder() {
        let r = region()
            .align(HorizontalAlignment::Center)
            .colors(Color::Black, Some(Color::LightGray))
            .with_text("1900");
        assert_eq!(r.alignment, HorizontalAlignment::Center);
        assert_eq!(r.fg_color, Color::Black);
        assert_eq!(r.bg_color, Some(Color::LightGray));
        assert_eq!(r.text(), "1900");
    }
}
