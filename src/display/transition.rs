/*
 *  display/transition.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Slide-in transition played when the window is pushed animated
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

use std::time::Duration;

/// Window slides up from the bottom edge until it sits at offset 0
#[derive(Debug, Clone, Copy)]
pub struct SlideTransition {
    height: u32,
    frames: u32,
    frame: Duration,
}

impl SlideTransition {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

    pub fn new(height: u32, fps: u32, duration: Duration) -> Self {
        let frame = Duration::from_micros((1_000_000u32 / fps.max(1)) as u64);
        let frames = (duration.as_micros() / frame.as_micros().max(1)).clamp(1, u32::MAX as u128) as u32;
        Self { height, frames, frame }
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Delay between two frames
    pub fn frame_interval(&self) -> Duration {
        self.frame
    }

    /// Vertical offset of every frame; strictly decreasing, last one is 0
    pub fn offsets(&self) -> impl Iterator<Item = i32> + '_ {
        (1..=self.frames).map(move |i| {
            let remaining = (self.frames - i) as u64;
            (self.height as u64 * remaining / self.frames as u64) as i32
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count() {
        let t = SlideTransition::new(168, 20, Duration::from_millis(250));
        assert_eq!(t.frame_interval(), Duration::from_millis(50));
        assert_eq!(t.frames(), 5);
    }

    #[test]
    fn test_offsets_end_at_rest() {
        let t = SlideTransition::new(168, 20, Duration::from_millis(250));
        let offsets: Vec<i32> = t.offsets().collect();
        assert_eq!(offsets, vec![134, 100, 67, 33, 0]);
    }

    #[test]
    fn test_short_duration_single_frame() {
        let t = SlideTransition::new(168, 10, Duration::from_millis(1));
        assert_eq!(t.offsets().collect::<Vec<_>>(), vec![0]);
    }
}
