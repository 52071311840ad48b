/*
 *  watchface/window.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  The watchface window and its visibility
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

use super::event::WatchEvent;
use crate::display::color::Color;
use crate::display::ScreenBounds;

/// The single full-screen window of the watchface
#[derive(Debug, Clone)]
pub struct Window {
    bounds: ScreenBounds,
    background: Color,
    shown: bool,
    /// slide in on the next draw
    pending_animation: bool,
}

impl Window {
    pub fn new(bounds: ScreenBounds) -> Self {
        Self {
            bounds,
            background: Color::White,
            shown: false,
            pending_animation: false,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Put the window on screen; None if it already is
    pub fn push(&mut self, animated: bool) -> Option<WatchEvent> {
        if self.shown {
            return None;
        }
        self.shown = true;
        self.pending_animation = animated;
        Some(WatchEvent::WindowShown(self.bounds))
    }

    /// Take the window off screen; None if it was not shown
    pub fn hide(&mut self) -> Option<WatchEvent> {
        if !self.shown {
            return None;
        }
        self.shown = false;
        self.pending_animation = false;
        Some(WatchEvent::WindowHidden)
    }

    /// True once after an animated push
    pub fn take_animation(&mut self) -> bool {
        std::mem::take(&mut self.pending_animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_hide() {
        let bounds = ScreenBounds::new(144, 168);
        let mut window = Window::new(bounds);
        assert_eq!(window.background(), Color::White);
        assert_eq!(window.hide(), None);

        assert_eq!(window.push(true), Some(WatchEvent::WindowShown(bounds)));
        assert_eq!(window.push(true), None);
        assert!(window.take_animation());
        assert!(!window.take_animation());

        assert_eq!(window.hide(), Some(WatchEvent::WindowHidden));
        assert!(!window.is_shown());
    }
}
