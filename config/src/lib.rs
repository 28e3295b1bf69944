//! Utilities for parsing and merging Tessera configuration files.
//!
//! Configuration is read from, in decreasing priority:
//!
//! 1. `TESSERA_*` environment variables (`canvas.width` is `TESSERA_CANVAS_WIDTH`).
//! 2. `tessera.toml` files in the working directory and its ancestors, nearest first.
//! 3. `config.toml` in the Tessera home directory (`$TESSERA_HOME` or `~/.tessera`).
//! 4. Built-in defaults.
#![warn(missing_docs)]

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use crate::raw::RawConfig;

mod home;
mod parse;
mod paths;
mod raw;

/// The default canvas width and height, in device units.
pub const DEFAULT_CANVAS_SIZE: u32 = 800;
/// The default cap on recursion depth for recursive tilings.
pub const DEFAULT_MAX_DEPTH: u32 = 6;
/// The default stroke colour, as `#rrggbbaa`.
pub const DEFAULT_STROKE: &str = "#000000ff";

/// Fully resolved Tessera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output surface settings.
    pub canvas: CanvasConfig,
    /// Recursion settings.
    pub render: RenderConfig,
    /// Default drawing style.
    pub style: StyleConfig,
}

/// Output surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width of the whole-canvas frame.
    pub width: u32,
    /// Height of the whole-canvas frame.
    pub height: u32,
}

/// Recursion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// The largest recursion depth callers may request, if any.
    ///
    /// Configuration files and `TESSERA_RENDER_MAX_DEPTH` accept `"none"` to
    /// remove the cap.
    pub max_depth: Option<u32>,
}

/// Default drawing style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Stroke colour as a `#rrggbb` or `#rrggbbaa` hex string.
    pub stroke: String,
    /// Stroke weight in device units.
    pub weight: f64,
}

/// `render.max_depth` as written: a nonnegative depth, or `"none"` for no cap.
#[derive(Deserialize)]
#[serde(untagged)]
enum DepthSetting {
    Depth(u32),
    Keyword(String),
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE.to_string(),
            weight: 1.,
        }
    }
}

impl Config {
    /// Loads configuration for the current process environment and working directory.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Result<Self> {
        let raw = RawConfig::default()?;
        Self::from_raw(&raw)
    }

    /// Loads configuration using an explicit environment snapshot and working directory.
    ///
    /// The Tessera home directory is resolved from `env`.
    pub fn from_env_and_path(env: HashMap<String, String>, cwd: impl Into<PathBuf>) -> Result<Self> {
        let cwd = cwd.into();
        let homedir = home::tessera_home_with_env(&env, &cwd).ok_or_else(|| {
            anyhow!("could not determine the Tessera home directory from the environment")
        })?;
        let mut raw = RawConfig::new(cwd, homedir);
        raw.set_env(env);
        Self::from_raw(&raw)
    }

    /// The built-in defaults, ignoring all files and environment variables.
    pub fn builtin() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            render: RenderConfig::default(),
            style: StyleConfig::default(),
        }
    }

    pub(crate) fn from_raw(raw: &RawConfig) -> Result<Self> {
        let defaults = Self::builtin();
        let cfg = Self {
            canvas: CanvasConfig {
                width: raw.get("canvas.width")?.unwrap_or(defaults.canvas.width),
                height: raw.get("canvas.height")?.unwrap_or(defaults.canvas.height),
            },
            render: RenderConfig {
                max_depth: match raw.get::<DepthSetting>("render.max_depth")? {
                    None => defaults.render.max_depth,
                    Some(DepthSetting::Depth(depth)) => Some(depth),
                    Some(DepthSetting::Keyword(word)) if word.eq_ignore_ascii_case("none") => None,
                    Some(DepthSetting::Keyword(word)) => bail!(
                        "invalid configuration for key `render.max_depth`: expected a depth or \"none\", found `{}`",
                        word
                    ),
                },
            },
            style: StyleConfig {
                stroke: raw.get("style.stroke")?.unwrap_or(defaults.style.stroke),
                weight: raw.get("style.weight")?.unwrap_or(defaults.style.weight),
            },
        };
        cfg.validate()?;
        tracing::debug!(?cfg, "loaded Tessera configuration");
        Ok(cfg)
    }

    /// Checks values that deserialize correctly but are unusable.
    fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            bail!(
                "canvas dimensions must be nonzero, found {}x{}",
                self.canvas.width,
                self.canvas.height
            );
        }
        if !self.style.weight.is_finite() || self.style.weight < 0. {
            bail!(
                "stroke weight must be a nonnegative number, found {}",
                self.style.weight
            );
        }
        Ok(())
    }
}
