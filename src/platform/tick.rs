/*
 *  platform/tick.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Minute tick subscription aligned to the wall clock
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

use chrono::{NaiveDateTime, Timelike};
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::Clock;
use crate::watchface::event::WatchEvent;

const MINUTE: Duration = Duration::from_secs(60);

/// Time left until the next minute boundary, never zero
pub fn until_next_minute(now: NaiveDateTime) -> Duration {
    // nanoseconds above 1e9 encode a leap second
    let into_minute = Duration::from_secs(now.second() as u64)
        + Duration::from_nanos((now.nanosecond() % 1_000_000_000) as u64);
    MINUTE.saturating_sub(into_minute).max(Duration::from_millis(1))
}

/// Send a `Tick` each time local time enters a new minute
///
/// The reading at subscription time counts as seen, so the first tick is
/// the next minute. A wake-up that lands in an already reported minute is
/// dropped. The task ends when the receiver goes away.
pub fn subscribe_minutes(clock: Arc<dyn Clock>, events: UnboundedSender<WatchEvent>) -> JoinHandle<()> {
    let mut last = clock.reading();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(until_next_minute(clock.now())).await;
            let reading = clock.reading();
            if reading == last {
                continue;
            }
            last = reading;
            if events.send(WatchEvent::Tick(reading)).is_err() {
                debug!("Tick receiver gone, minute subscription ends");
                break;
            }
        }
    })
}
