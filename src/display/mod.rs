/*
 *  display/mod.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - regions, layout, rendering and drivers
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
use embedded_graphics::primitives::Rectangle;

pub mod color;
pub mod drivers;
pub mod error;
pub mod layout_manager;
pub mod region;
pub mod render;
pub mod traits;
pub mod transition;

pub use color::Color;
pub use drivers::HeadlessDriver;
pub use error::DisplayError;
pub use layout_manager::LayoutManager;
pub use region::{Region, RegionKind, RegionSet};
pub use traits::{DisplayCapabilities, DisplayDriver};
pub use transition::SlideTransition;

/// Size of the window's root area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    pub width: u32,
    pub height: u32,
}

impl ScreenBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Full-screen rectangle anchored at the origin
    pub fn rectangle(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }
}
