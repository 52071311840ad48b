/*
 *  platform/battery.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Battery sources and the charge change subscription
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

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::BatteryMonitor;
use crate::format::ChargeLevel;
use crate::watchface::event::WatchEvent;

/// Linux power_supply class battery
///
/// `path` may be the supply directory (`/sys/class/power_supply/BAT0`) or
/// the `capacity` file itself.
#[derive(Debug)]
pub struct SysfsBattery {
    capacity: PathBuf,
    last: AtomicU8,
    warned: AtomicBool,
}

impl SysfsBattery {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let capacity = if path.is_dir() { path.join("capacity") } else { path.to_path_buf() };
        Self {
            capacity,
            last: AtomicU8::new(ChargeLevel::FULL.percent()),
            warned: AtomicBool::new(false),
        }
    }

    fn read_capacity(&self) -> std::io::Result<u8> {
        let raw = fs::read_to_string(&self.capacity)?;
        let value: u32 = raw
            .trim()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(value.min(100) as u8)
    }
}

impl BatteryMonitor for SysfsBattery {
    fn peek(&self) -> ChargeLevel {
        match self.read_capacity() {
            Ok(percent) => {
                self.last.store(percent, Ordering::Relaxed);
                self.warned.store(false, Ordering::Relaxed);
                ChargeLevel::new(percent)
            }
            Err(e) => {
                let last = self.last.load(Ordering::Relaxed);
                if !self.warned.swap(true, Ordering::Relaxed) {
                    warn!("Cannot read {}: {}, keeping {}%", self.capacity.display(), e, last);
                } else {
                    debug!("Battery still unreadable: {}", e);
                }
                ChargeLevel::new(last)
            }
        }
    }
}

/// Battery that reports whatever it was last set to
#[derive(Debug)]
pub struct FixedBattery {
    level: AtomicU8,
}

impl FixedBattery {
    pub fn new(level: ChargeLevel) -> Self {
        Self { level: AtomicU8::new(level.percent()) }
    }

    pub fn set(&self, level: ChargeLevel) {
        self.level.store(level.percent(), Ordering::Relaxed);
    }
}

impl BatteryMonitor for FixedBattery {
    fn peek(&self) -> ChargeLevel {
        ChargeLevel::new(self.level.load(Ordering::Relaxed))
    }
}

/// Poll `monitor` every `every` and send `BatteryChanged` when the level moves
///
/// The level at subscription time counts as reported.
pub fn subscribe_battery(
    monitor: Arc<dyn BatteryMonitor>,
    every: Duration,
    events: UnboundedSender<WatchEvent>,
) -> JoinHandle<()> {
    let mut last = monitor.peek();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(every).await;
            let level = monitor.peek();
            if level == last {
                continue;
            }
            debug!("Battery {}% -> {}%", last.percent(), level.percent());
            last = level;
            if events.send(WatchEvent::BatteryChanged(level)).is_err() {
                debug!("Battery receiver gone, subscription ends");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sysfs_reads_capacity_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("capacity"), "87\n").unwrap();
        let battery = SysfsBattery::new(dir.path());
        assert_eq!(battery.peek(), ChargeLevel::new(87));
    }

    #[test]
    fn test_sysfs_keeps_last_known() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "42").unwrap();
        let battery = SysfsBattery::new(f.path());
        assert_eq!(battery.peek().percent(), 42);

        fs::write(f.path(), "garbage").unwrap();
        assert_eq!(battery.peek().percent(), 42);

        fs::write(f.path(), "250").unwrap();
        assert_eq!(battery.peek(), ChargeLevel::FULL);
    }

    #[test]
    fn test_sysfs_missing_reports_full() {
        let battery = SysfsBattery::new("/nonexistent/BAT9/capacity");
        assert_eq!(battery.peek(), ChargeLevel::FULL);
    }

    #[test]
    fn test_fixed_battery() {
        let battery = FixedBattery::new(ChargeLevel::new(80));
        assert_eq!(battery.peek().percent(), 80);
        battery.set(ChargeLevel::new(79));
        assert_eq!(battery.peek().percent(), 79);
    }
}
