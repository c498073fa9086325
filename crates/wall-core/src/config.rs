//! Configuration System
//!
//! Wall geometry, engine timing and pointer feedback settings, loadable from
//! `wall.toml`. Every geometry value passes through the same validating
//! setters the engine exposes, so a file cannot smuggle in a value the
//! layout formula would divide by.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use wall_events::ID_AXIS_STRIDE;

use crate::pointer::Rgba;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "wall.toml";

/// Smallest accepted row or column count.
pub const MIN_GRID_DIMENSION: u32 = 2;

/// Largest accepted row or column count. Cell ids encode each axis in two
/// decimal digits, so 100 or more would collide.
pub const MAX_GRID_DIMENSION: u32 = ID_AXIS_STRIDE - 1;

/// Largest accepted outward tilt, in degrees.
pub const MAX_TILT_DEGREES: f32 = 90.0;

/// Default debounce before a parameter edit rebuilds the wall.
pub const DEFAULT_REBUILD_DELAY: f64 = 0.1;

/// Default duration of the pointer color flash.
pub const DEFAULT_FLASH_DURATION: f64 = 0.1;

/// Returns true if `count` is an accepted row or column count.
pub fn is_valid_grid_dimension(count: u32) -> bool {
    (MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&count)
}

/// Returns true if `size` is an accepted wall extent or scale component.
pub fn is_valid_size(size: f32) -> bool {
    size.is_finite() && size >= 0.0
}

/// Returns true if `ratio` is an accepted curvature ratio. Zero is rejected.
pub fn is_valid_curve_ratio(ratio: f32) -> bool {
    ratio > 0.0 && ratio <= 1.0
}

/// Returns true if `angle` is an accepted maximum tilt.
pub fn is_valid_max_angle(angle: f32) -> bool {
    (0.0..=MAX_TILT_DEGREES).contains(&angle)
}

/// Shape of the curved wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Number of rows (y axis)
    pub row_count: u32,
    /// Number of columns (x axis)
    pub column_count: u32,
    /// Planar extent in x and y; z scales the curvature depth
    pub wall_size: Vec3,
    /// Fraction of a quarter turn bent across the x axis
    pub x_curve_ratio: f32,
    /// Fraction of a quarter turn bent across the y axis
    pub y_curve_ratio: f32,
    /// Outward tilt at the grid edge, in degrees
    pub max_angle: f32,
    /// Scale applied to every spawned cell. Scaling z distorts cell animations.
    pub cell_scale: Vec3,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            row_count: 8,
            column_count: 11,
            wall_size: Vec3::new(10.0, 5.0, 1.0),
            x_curve_ratio: 1.0,
            y_curve_ratio: 1.0,
            max_angle: 90.0,
            cell_scale: Vec3::ONE,
        }
    }
}

impl WallConfig {
    /// Builds a config from untrusted values, keeping the default for every
    /// field that fails validation.
    pub fn sanitized(raw: &WallConfig) -> Self {
        let mut config = WallConfig::default();
        config.update_grid_size(Some(raw.row_count), Some(raw.column_count));
        config.update_wall_size(
            Some(raw.wall_size.x),
            Some(raw.wall_size.y),
            Some(raw.wall_size.z),
        );
        config.update_curve_ratio(Some(raw.x_curve_ratio), Some(raw.y_curve_ratio));
        config.update_max_angle(Some(raw.max_angle));
        config.update_cell_scale(
            Some(raw.cell_scale.x),
            Some(raw.cell_scale.y),
            Some(raw.cell_scale.z),
        );
        config
    }

    /// Sets row and column counts. `None` or out-of-range values are ignored.
    pub fn update_grid_size(&mut self, row_count: Option<u32>, column_count: Option<u32>) {
        if let Some(rows) = row_count {
            if is_valid_grid_dimension(rows) {
                self.row_count = rows;
            } else {
                tracing::debug!("Ignoring row count {}", rows);
            }
        }
        if let Some(columns) = column_count {
            if is_valid_grid_dimension(columns) {
                self.column_count = columns;
            } else {
                tracing::debug!("Ignoring column count {}", columns);
            }
        }
    }

    /// Sets wall extent per component. Negative or non-finite values are ignored.
    pub fn update_wall_size(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        apply_size(&mut self.wall_size.x, x, "wall size x");
        apply_size(&mut self.wall_size.y, y, "wall size y");
        apply_size(&mut self.wall_size.z, z, "wall size z");
    }

    /// Sets curvature ratios. Values outside (0, 1] are ignored.
    pub fn update_curve_ratio(&mut self, x_ratio: Option<f32>, y_ratio: Option<f32>) {
        if let Some(ratio) = x_ratio {
            if is_valid_curve_ratio(ratio) {
                self.x_curve_ratio = ratio;
            } else {
                tracing::debug!("Ignoring x curve ratio {}", ratio);
            }
        }
        if let Some(ratio) = y_ratio {
            if is_valid_curve_ratio(ratio) {
                self.y_curve_ratio = ratio;
            } else {
                tracing::debug!("Ignoring y curve ratio {}", ratio);
            }
        }
    }

    /// Sets the edge tilt. Values outside [0, 90] are ignored.
    pub fn update_max_angle(&mut self, max_angle: Option<f32>) {
        if let Some(angle) = max_angle {
            if is_valid_max_angle(angle) {
                self.max_angle = angle;
            } else {
                tracing::debug!("Ignoring max angle {}", angle);
            }
        }
    }

    /// Sets cell scale per component. Negative or non-finite values are ignored.
    pub fn update_cell_scale(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        apply_size(&mut self.cell_scale.x, x, "cell scale x");
        apply_size(&mut self.cell_scale.y, y, "cell scale y");
        apply_size(&mut self.cell_scale.z, z, "cell scale z");
    }

    /// Total number of grid points, corners included.
    pub fn point_count(&self) -> usize {
        (self.column_count * self.row_count) as usize
    }

    /// Number of interactive cells a generated wall holds (corners excluded).
    pub fn cell_count(&self) -> usize {
        if self.column_count < MIN_GRID_DIMENSION || self.row_count < MIN_GRID_DIMENSION {
            return 0;
        }
        self.point_count().saturating_sub(4)
    }
}

fn apply_size(target: &mut f32, value: Option<f32>, label: &str) {
    if let Some(size) = value {
        if is_valid_size(size) {
            *target = size;
        } else {
            tracing::debug!("Ignoring {} {}", label, size);
        }
    }
}

/// Engine timing and randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Quiet period after the last parameter edit before the wall rebuilds
    pub rebuild_delay: f64,
    /// Seed for random cell selection
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rebuild_delay: DEFAULT_REBUILD_DELAY,
            seed: 42,
        }
    }
}

/// Pointer feedback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Color shown on laser and cursor while a shot flashes
    pub shoot_color: Rgba,
    /// How long the flash lasts
    pub flash_duration: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            shoot_color: Rgba::RED,
            flash_duration: DEFAULT_FLASH_DURATION,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub wall: WallConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string, sanitizing every value.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let raw: AppConfig = toml::from_str(content)?;
        Ok(raw.sanitized())
    }

    /// Loads configuration from the given path, or uses defaults if it cannot be read.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn sanitized(self) -> Self {
        let defaults = AppConfig::default();
        let engine = EngineConfig {
            rebuild_delay: non_negative_or(
                self.engine.rebuild_delay,
                defaults.engine.rebuild_delay,
            ),
            seed: self.engine.seed,
        };
        let pointer = PointerConfig {
            shoot_color: self.pointer.shoot_color,
            flash_duration: non_negative_or(
                self.pointer.flash_duration,
                defaults.pointer.flash_duration,
            ),
        };
        Self {
            wall: WallConfig::sanitized(&self.wall),
            engine,
            pointer,
        }
    }
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
