/*
 *  display/color.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display-independent color definitions
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

use embedded_graphics::pixelcolor::Gray4;

/// Watchface palette
///
/// Regions name their colors once; the renderer converts to the panel's
/// pixel format. Transparency is expressed as `Option<Color>` on the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Black/Off (0% intensity)
    Black,

    /// Light gray (67% intensity)
    LightGray,

    /// White/On (100% intensity)
    White,
}

impl Color {
    /// Convert to Gray4 (4-bit grayscale: 0-15)
    pub fn to_gray4(&self) -> Gray4 {
        match self {
            Color::Black => Gray4::new(0),
            Color::LightGray => Gray4::new(11),
            Color::White => Gray4::new(15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray4_conversion() {
        assert_eq!(Color::Black.to_gray4(), Gray4::new(0));
        assert_eq!(Color::LightGray.to_gray4(), Gray4::new(11));
        assert_eq!(Color::White.to_gray4(), Gray4::new(15));
    }
}
