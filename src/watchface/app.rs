/*
 *  watchface/app.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Watchface application: lifecycle, event loop and drawing
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
use embedded_graphics::prelude::*;
use log::{debug, error, info, warn};
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::event::WatchEvent;
use super::state::{mark, WatchfaceState};
use super::window::Window;
use crate::config::DEFAULT_POLL_SECS;
use crate::display::error::DisplayError;
use crate::display::layout_manager::LayoutManager;
use crate::display::region::RegionSet;
use crate::display::render::{draw_window, draw_window_at};
use crate::display::traits::DisplayDriver;
use crate::display::transition::SlideTransition;
use crate::format::HourStyle;
use crate::platform::{subscribe_battery, subscribe_minutes, BatteryMonitor, Clock};

#[derive(Debug, Clone)]
pub struct WatchfaceOptions {
    /// slide the window in when pushed, at the driver's frame rate
    pub animate: bool,
    pub battery_poll: Duration,
}

impl Default for WatchfaceOptions {
    fn default() -> Self {
        Self {
            animate: true,
            battery_poll: Duration::from_secs(DEFAULT_POLL_SECS),
        }
    }
}

/// The watchface application
///
/// Owns the display driver, the window, the state machine and the platform
/// subscriptions. All events funnel through one channel and are handled
/// strictly one after another.
pub struct Watchface<D> {
    driver: D,
    state: WatchfaceState,
    window: Window,
    clock: Arc<dyn Clock>,
    battery: Arc<dyn BatteryMonitor>,
    options: WatchfaceOptions,
    events_tx: UnboundedSender<WatchEvent>,
    events_rx: UnboundedReceiver<WatchEvent>,
    subscriptions: Vec<JoinHandle<()>>,
}

impl<D> Watchface<D>
where
    D: DisplayDriver + DrawTarget<Color = Gray4>,
    D::Error: Debug,
{
    /// Bring the display up, subscribe to minute ticks and battery changes
    /// and push the window. Must run inside a Tokio runtime.
    ///
    /// The window is queued as shown; it is drawn when the event loop picks
    /// that up (`run_until` or `pump`).
    pub fn init(
        mut driver: D,
        clock: Arc<dyn Clock>,
        battery: Arc<dyn BatteryMonitor>,
        options: WatchfaceOptions,
    ) -> Result<Self, DisplayError> {
        driver.init()?;
        let bounds = driver.capabilities().bounds();
        // reject a screen the regions cannot fit before anything is queued
        LayoutManager::build(bounds)?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let subscriptions = vec![
            subscribe_minutes(Arc::clone(&clock), events_tx.clone()),
            subscribe_battery(Arc::clone(&battery), options.battery_poll, events_tx.clone()),
        ];

        let hour_style = HourStyle::from_24h(clock.is_24h_style());
        let mut watchface = Self {
            driver,
            state: WatchfaceState::new(hour_style),
            window: Window::new(bounds),
            clock,
            battery,
            options,
            events_tx,
            events_rx,
            subscriptions,
        };
        watchface.show(watchface.options.animate)?;

        info!(
            "Watchface up on {}x{}, {:?}, battery polled every {:?}",
            bounds.width, bounds.height, hour_style, watchface.options.battery_poll
        );
        Ok(watchface)
    }

    /// Sender for injecting events into the loop
    pub fn events(&self) -> UnboundedSender<WatchEvent> {
        self.events_tx.clone()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn regions(&self) -> Option<&RegionSet> {
        self.state.layout().regions()
    }

    pub fn is_shown(&self) -> bool {
        self.window.is_shown()
    }

    /// Queue the window for showing; no-op when it already is
    pub fn show(&mut self, animated: bool) -> Result<(), DisplayError> {
        match self.window.push(animated) {
            Some(event) => self.queue(event),
            None => Ok(()),
        }
    }

    /// Queue the window for hiding; no-op when it is not shown
    pub fn hide(&mut self) -> Result<(), DisplayError> {
        match self.window.hide() {
            Some(event) => self.queue(event),
            None => Ok(()),
        }
    }

    fn queue(&self, event: WatchEvent) -> Result<(), DisplayError> {
        self.events_tx
            .send(event)
            .map_err(|_| DisplayError::Other("event loop closed".to_string()))
    }

    /// Handle one event and redraw what it changed
    pub async fn dispatch(&mut self, event: WatchEvent) -> Result<(), DisplayError> {
        let mut changes = self.state.handle(event)?;

        match event {
            WatchEvent::WindowShown(_) => {
                // fill in real values before the first frame
                let now = self.clock.reading();
                let level = self.battery.peek();
                for kind in self.state.handle(WatchEvent::Tick(now))? {
                    mark(&mut changes, kind);
                }
                for kind in self.state.handle(WatchEvent::BatteryChanged(level))? {
                    mark(&mut changes, kind);
                }
            }
            WatchEvent::WindowHidden => {
                DisplayDriver::clear(&mut self.driver)?;
                return Ok(());
            }
            _ => {}
        }

        if changes.is_empty() {
            return Ok(());
        }
        debug!(
            "Redraw for {}",
            changes.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
        );
        self.render().await
    }

    /// Dispatch everything already queued, without waiting; returns the count
    pub async fn pump(&mut self) -> Result<usize, DisplayError> {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch_logged(event).await?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Process events until `shutdown` completes
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<(), DisplayError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            let event = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, leaving event loop");
                    return Ok(());
                }
                event = self.events_rx.recv() => event,
            };
            match event {
                Some(event) => self.dispatch_logged(event).await?,
                None => return Ok(()),
            }
        }
    }

    /// Contract violations are logged and skipped, driver failures propagate
    async fn dispatch_logged(&mut self, event: WatchEvent) -> Result<(), DisplayError> {
        match self.dispatch(event).await {
            Err(e @ (DisplayError::RegionsAbsent | DisplayError::RegionsAlreadyPresent)) => {
                warn!("Ignoring {:?}: {}", event, e);
                Ok(())
            }
            other => other,
        }
    }

    async fn render(&mut self) -> Result<(), DisplayError> {
        let Some(regions) = self.state.layout().regions() else {
            return Ok(());
        };
        let background = self.window.background();

        if self.window.take_animation() {
            let transition = SlideTransition::new(
                regions.bounds().height,
                self.driver.capabilities().max_fps,
                SlideTransition::DEFAULT_DURATION,
            );
            let mut frames = transition.offsets().peekable();
            while let Some(offset) = frames.next() {
                draw_window_at(&mut self.driver, regions, background, offset).map_err(drawing_error)?;
                self.driver.flush()?;
                if frames.peek().is_some() {
                    tokio::time::sleep(transition.frame_interval()).await;
                }
            }
            return Ok(());
        }

        draw_window(&mut self.driver, regions, background).map_err(drawing_error)?;
        self.driver.flush()
    }

    /// Hide the window, stop the subscriptions and blank the display
    pub fn deinit(mut self) -> Result<D, DisplayError> {
        self.release()?;
        info!("Watchface down");
        Ok(self.driver)
    }

    fn release(&mut self) -> Result<(), DisplayError> {
        for task in self.subscriptions.drain(..) {
            task.abort();
        }
        // a hide queued but never pumped still owes its unload
        self.window.hide();
        if self.state.layout().is_present() {
            self.state.handle(WatchEvent::WindowHidden)?;
        }
        if let Err(e) = DisplayDriver::clear(&mut self.driver) {
            error!("Display clear failed during shutdown: {}", e);
        }
        Ok(())
    }
}

fn drawing_error<E: Debug>(e: E) -> DisplayError {
    DisplayError::DrawingError(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::HeadlessDriver;
    use crate::format::ChargeLevel;
    use crate::platform::{FixedBattery, FixedClock};
    use chrono::NaiveDate;

    fn watchface() -> Watchface<HeadlessDriver> {
        let now = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap().and_hms_opt(9, 5, 0).unwrap();
        let options = WatchfaceOptions { animate: false, ..Default::default() };
        Watchface::init(
            HeadlessDriver::new_with_size(144, 168).unwrap(),
            Arc::new(FixedClock::new(now, true)),
            Arc::new(FixedBattery::new(ChargeLevel::new(87))),
            options,
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_unloads_pending_hide() {
        let mut face = watchface();
        face.pump().await.unwrap();
        face.hide().unwrap();
        assert!(!face.window.is_shown());
        assert!(face.state.layout().is_present());

        face.release().unwrap();
        assert!(!face.state.layout().is_present());
        assert!(face.subscriptions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_unloads_shown_window() {
        let mut face = watchface();
        face.pump().await.unwrap();

        face.release().unwrap();
        assert!(!face.window.is_shown());
        assert!(!face.state.layout().is_present());
    }
}
