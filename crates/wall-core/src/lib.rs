//! Curved wall layout: places a grid of targets on a bent surface and drives
//! their lifecycle.
//!
//! # Modules
//!
//! - [`config`]: Wall, engine and pointer settings, loaded from TOML
//! - [`geometry`]: Grid index to position/rotation mapping
//! - [`engine`]: Spawning, clearing, activation and debounced rebuilds
//! - [`cell`]: Cell entity contract and the `TimedCell` reference cell
//! - [`mesh`]: Mesh builder contract and the `PointGridMesh` surface builder
//! - [`pointer`]: Laser color flash on shoot
//! - [`schedule`]: Cancel-and-restart delayed tasks

pub mod cell;
pub mod config;
pub mod engine;
pub mod events;
pub mod geometry;
pub mod mesh;
pub mod pointer;
pub mod schedule;

pub use cell::{CellEntity, CellFactory, CellState, TimedCell};
pub use config::{
    AppConfig, ConfigError, EngineConfig, PointerConfig, WallConfig, DEFAULT_CONFIG_PATH,
    MAX_GRID_DIMENSION, MIN_GRID_DIMENSION,
};
pub use engine::{CellMap, WallCell, WallLayoutEngine, WallListener};
pub use events::PendingEvents;
pub use geometry::GridPoint;
pub use mesh::{MeshBuilder, PointGridMesh, SurfaceMesh};
pub use pointer::{LaserColors, LaserVisual, PointerFeedback, PointerState, Rgba};
pub use schedule::DelayedTask;
