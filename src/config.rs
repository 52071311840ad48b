/*
 *  config.rs
 *
 *  YearWatch - time, date, year and charge at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration: defaults, YAML file, command line
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

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

use crate::display::layout_manager::MIN_SCREEN_HEIGHT;

pub const DEFAULT_WIDTH: u32 = 144;
pub const DEFAULT_HEIGHT: u32 = 168;
pub const DEFAULT_FPS: u32 = 30;
pub const MAX_FPS: u32 = 120;
pub const DEFAULT_POLL_SECS: u64 = 30;
pub const DEFAULT_BATTERY_PATH: &str = "/sys/class/power_supply/BAT0";

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,      // e.g., "info" | "debug"
    /// platform 12/24 hour preference
    pub clock_24h: Option<bool>,
    /// slide the window in when it is pushed
    pub animate: Option<bool>,
    pub display: Option<DisplayConfig>,
    pub battery: Option<BatteryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// transition frame rate
    pub fps: Option<u32>,
    /// PGM file rewritten on every flush
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatteryConfig {
    pub source: Option<BatterySource>,
    pub poll_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BatterySource {
    /// power_supply directory or its capacity file
    Sysfs { path: PathBuf },
    Fixed { percent: u8 },
}

impl Default for BatterySource {
    fn default() -> Self {
        BatterySource::Sysfs { path: PathBuf::from(DEFAULT_BATTERY_PATH) }
    }
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn clock_24h(&self) -> bool {
        self.clock_24h.unwrap_or(true)
    }

    pub fn animate(&self) -> bool {
        self.animate.unwrap_or(true)
    }

    pub fn display(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_default()
    }

    pub fn battery_source(&self) -> BatterySource {
        self.battery
            .as_ref()
            .and_then(|b| b.source.clone())
            .unwrap_or_default()
    }

    pub fn battery_poll(&self) -> Duration {
        let secs = self.battery
            .as_ref()
            .and_then(|b| b.poll_secs)
            .unwrap_or(DEFAULT_POLL_SECS);
        Duration::from_secs(secs)
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "yearwatch", about = "Time, date, year and battery watchface", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long, action = ArgAction::Set)]
    pub clock_24h: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub animate: Option<bool>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long)]
    pub display_fps: Option<u32>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,
    /// read the charge from this power_supply path
    #[arg(long, value_hint = ValueHint::AnyPath, conflicts_with = "battery_percent")]
    pub battery_path: Option<PathBuf>,
    /// report a fixed charge instead of reading the platform
    #[arg(long)]
    pub battery_percent: Option<u8>,
    #[arg(long)]
    pub battery_poll_secs: Option<u64>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Read YAML, merge the command line over it, validate.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/yearwatch/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/yearwatch/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/yearwatch.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["yearwatch.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()  { dst.log_level = src.log_level; }
    if src.clock_24h.is_some()  { dst.clock_24h = src.clock_24h; }
    if src.animate.is_some()    { dst.animate = src.animate; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.battery, src.battery) {
        (None, Some(c)) => dst.battery = Some(c),
        (Some(d), Some(s)) => merge_battery(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()     { dst.width = src.width; }
    if src.height.is_some()    { dst.height = src.height; }
    if src.fps.is_some()       { dst.fps = src.fps; }
    if src.snapshot.is_some()  { dst.snapshot = src.snapshot; }
}

fn merge_battery(dst: &mut BatteryConfig, src: BatteryConfig) {
    if src.source.is_some()     { dst.source = src.source; }
    if src.poll_secs.is_some()  { dst.poll_secs = src.poll_secs; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()  { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                { cfg.log_level = Some("debug".into()); }
    if cli.clock_24h.is_some()  { cfg.clock_24h = cli.clock_24h; }
    if cli.animate.is_some()    { cfg.animate = cli.animate; }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.display_fps.is_some()
        || cli.snapshot.is_some();
    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.display_width.is_some()   { display.width = cli.display_width; }
        if cli.display_height.is_some()  { display.height = cli.display_height; }
        if cli.display_fps.is_some()     { display.fps = cli.display_fps; }
        if cli.snapshot.is_some()        { display.snapshot = cli.snapshot.clone(); }
    }

    let source = match (&cli.battery_path, cli.battery_percent) {
        (Some(path), _) => Some(BatterySource::Sysfs { path: path.clone() }),
        (None, Some(percent)) => Some(BatterySource::Fixed { percent }),
        (None, None) => None,
    };
    if (source.is_some() || cli.battery_poll_secs.is_some()) && cfg.battery.is_none() {
        cfg.battery = Some(BatteryConfig::default());
    }
    if let Some(battery) = cfg.battery.as_mut() {
        if source.is_some()                  { battery.source = source; }
        if cli.battery_poll_secs.is_some()   { battery.poll_secs = cli.battery_poll_secs; }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) {
            return Err(ConfigError::Validation("display width must be > 0".into()));
        }
        if let Some(h) = display.height {
            if h < MIN_SCREEN_HEIGHT {
                return Err(ConfigError::Validation(format!(
                    "display height must be >= {}", MIN_SCREEN_HEIGHT
                )));
            }
        }
        if let Some(fps) = display.fps {
            if fps == 0 || fps > MAX_FPS {
                return Err(ConfigError::Validation(format!("display fps must be 1..={}", MAX_FPS)));
            }
        }
    }
    if let Some(battery) = cfg.battery.as_ref() {
        if let Some(BatterySource::Fixed { percent }) = battery.source {
            if percent > 100 {
                return Err(ConfigError::Validation("battery percent must be 0..=100".into()));
            }
        }
        if battery.poll_secs == Some(0) {
            return Err(ConfigError::Validation("battery poll_secs must be > 0".into()));
        }
    }
    Ok(())
}
