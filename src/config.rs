//! Run settings: built-in defaults, an optional settings file, then flags.
//!
//! The settings file may be TOML, YAML or JSON (picked by extension):
//!
//! ```toml
//! output = "/var/tmp/gc.png"
//! datetime_format = "%Y-%m-%dT%H:%M:%S%.f%z"
//! tail_time = "6h"
//! heap_mode = "after"
//! skip_bad_timestamps = true
//! width = 2400
//! height = 1000
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::TimeDelta;
use config::{Config, File};
use serde::Deserialize;

use crate::data::{resolve_duration_quantity, HeapMode};
use crate::error::GcLogError;
use crate::render::ChartOptions;
use crate::source::{ParseOptions, TimestampPolicy, DEFAULT_DATETIME_FORMAT};

/// Default chart location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "./java-gclog-graph.png";

/// Resolved settings for one run, minus the input path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the PNG is written.
    pub output: PathBuf,
    /// chrono pattern for log timestamps.
    pub datetime_format: String,
    /// Trailing window such as "30m" or "2d"; `None` graphs everything.
    pub tail_time: Option<String>,
    pub heap_mode: HeapMode,
    /// Drop lines with unparseable timestamps instead of aborting.
    pub skip_bad_timestamps: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let chart = ChartOptions::default();
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            tail_time: None,
            heap_mode: HeapMode::default(),
            skip_bad_timestamps: false,
            width: chart.width,
            height: chart.height,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults for missing keys.
    ///
    /// Environment variables are deliberately not consulted.
    pub fn load(path: &Path) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path))
            .build()
            .and_then(|config| config.try_deserialize())
            .with_context(|| format!("Failed to load settings from {}", path.display()))
    }

    /// Defaults, or the contents of `path` when given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            datetime_format: self.datetime_format.clone(),
            timestamp_policy: if self.skip_bad_timestamps {
                TimestampPolicy::Skip
            } else {
                TimestampPolicy::Strict
            },
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.width,
            height: self.height,
            heap_mode: self.heap_mode,
        }
    }

    /// The tail window, if one is configured.
    pub fn tail_window(&self) -> Result<Option<TimeDelta>, GcLogError> {
        let Some(text) = self.tail_time.as_deref() else {
            return Ok(None);
        };
        let seconds = resolve_duration_quantity(text)?;
        i64::try_from(seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .map(Some)
            .ok_or_else(|| GcLogError::MalformedQuantity {
                input: text.to_string(),
            })
    }
}
