/*
 *  display/drivers/headless.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Headless display driver - in-memory panel with optional PGM snapshots
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

use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info};

use crate::config::{DisplayConfig, DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::display::color::Color;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};
use crate::vframebuf::VarFrameBuf;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Headless display driver
///
/// Draws into a 16-level grayscale framebuffer instead of a panel. Every
/// flush is counted and, when a snapshot path is configured, the frame is
/// written there as a PGM image so the face can be inspected on a desktop.
#[derive(Debug, Clone)]
pub struct HeadlessDriver {
    framebuffer: VarFrameBuf<Gray4>,

    capabilities: DisplayCapabilities,

    snapshot: Option<PathBuf>,

    /// Shared so tests can keep a handle after the driver moves
    state: Arc<Mutex<HeadlessState>>,
}

/// Operation counters, shared for inspection
#[derive(Debug, Default)]
pub struct HeadlessState {
    pub init_count: usize,
    pub flush_count: usize,
    pub clear_count: usize,
    pub snapshots_written: usize,
    pub is_initialized: bool,

    /// Fail the next flushes (for error testing)
    pub simulate_flush_failure: bool,
}

impl HeadlessDriver {
    pub fn new(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let width = config.width.unwrap_or(DEFAULT_WIDTH);
        let height = config.height.unwrap_or(DEFAULT_HEIGHT);
        if width == 0 || height == 0 {
            return Err(DisplayError::InvalidConfiguration(format!(
                "headless panel {}x{} has no pixels", width, height
            )));
        }

        let capabilities = DisplayCapabilities {
            width,
            height,
            max_fps: config.fps.unwrap_or(DEFAULT_FPS),
        };

        Ok(Self {
            framebuffer: VarFrameBuf::new(width, height, Color::Black.to_gray4()),
            capabilities,
            snapshot: config.snapshot.clone(),
            state: Arc::new(Mutex::new(HeadlessState::default())),
        })
    }

    /// Create a headless driver with specific dimensions
    pub fn new_with_size(width: u32, height: u32) -> Result<Self, DisplayError> {
        let config = DisplayConfig {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        };
        Self::new(&config)
    }

    pub fn framebuffer(&self) -> &VarFrameBuf<Gray4> {
        &self.framebuffer
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Gray4> {
        self.framebuffer.pixel(x, y)
    }

    pub fn state(&self) -> Arc<Mutex<HeadlessState>> {
        Arc::clone(&self.state)
    }

    fn lock_state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_snapshot(&self) -> Result<bool, DisplayError> {
        let Some(path) = self.snapshot.as_ref() else {
            return Ok(false);
        };
        let mut out = BufWriter::new(File::create(path)?);
        self.framebuffer.write_pgm(&mut out)?;
        Ok(true)
    }
}

impl DisplayDriver for HeadlessDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock_state();
        state.init_count += 1;
        state.is_initialized = true;
        info!(
            "Headless display {}x{} ready{}",
            self.capabilities.width,
            self.capabilities.height,
            match &self.snapshot {
                Some(path) => format!(", snapshots to {}", path.display()),
                None => String::new(),
            }
        );
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.lock_state().simulate_flush_failure {
            return Err(DisplayError::Other("Simulated flush failure".to_string()));
        }

        let written = self.write_snapshot()?;

        let mut state = self.lock_state();
        state.flush_count += 1;
        if written {
            state.snapshots_written += 1;
            debug!("Snapshot {} written", state.snapshots_written);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lock_state().clear_count += 1;
        self.framebuffer.clear_color(Color::Black.to_gray4());
        self.flush()
    }
}

impl DrawTarget for HeadlessDriver {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.clear_color(color);
        Ok(())
    }
}

impl OriginDimensions for HeadlessDriver {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}
