/*
 *  main.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Entry point: configuration, logging, runtime and shutdown
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

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::sync::Arc;

use yearwatch::config::{self, BatterySource, Cli, Config};
use yearwatch::display::HeadlessDriver;
use yearwatch::format::ChargeLevel;
use yearwatch::platform::{BatteryMonitor, Clock, FixedBattery, SysfsBattery, SystemClock};
use yearwatch::watchface::{Watchface, WatchfaceOptions};

mod build_info {
    include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
}

/// Waits for SIGINT, SIGTERM or SIGHUP
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let signals = (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
        signal(SignalKind::hangup()),
    );
    let (mut sigint, mut sigterm, mut sighup) = match signals {
        (Ok(i), Ok(t), Ok(h)) => (i, t, h),
        _ => {
            error!("Unix signal handlers unavailable, falling back to Ctrl-C");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Ctrl-C received. Initiating graceful shutdown.");
    }
}

async fn run(cfg: Config) -> anyhow::Result<()> {
    let driver = HeadlessDriver::new(&cfg.display()).context("display setup")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(cfg.clock_24h()));
    let battery: Arc<dyn BatteryMonitor> = match cfg.battery_source() {
        BatterySource::Sysfs { path } => {
            info!("Battery from {}", path.display());
            Arc::new(SysfsBattery::new(path))
        }
        BatterySource::Fixed { percent } => {
            info!("Battery fixed at {}%", percent);
            Arc::new(FixedBattery::new(ChargeLevel::new(percent)))
        }
    };

    let options = WatchfaceOptions {
        animate: cfg.animate(),
        battery_poll: cfg.battery_poll(),
    };

    let mut watchface = Watchface::init(driver, clock, battery, options)?;
    let outcome = watchface.run_until(shutdown_signal()).await;
    watchface.deinit()?;
    outcome?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_with(&cli)?;

    if cli.dump_config {
        println!("{}", serde_yaml::to_string(&cfg)?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), build_info::BUILD_DATE);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("tokio runtime")?;

    runtime.block_on(run(cfg))
}
