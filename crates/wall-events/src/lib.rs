//! Shared data types for the curved wall layout.
//!
//! This crate contains pure data structures with no layout logic.
//! Observers (UI, analytics, tooling) depend on it without pulling in the
//! engine itself.

pub mod cell;
pub mod event;
pub mod snapshot;
pub mod time;
pub mod transform;

// Re-export cell addressing types
pub use cell::{normalized_coord, CellId, GridIndex, ParseCellIdError, ID_AXIS_STRIDE};

// Re-export event types
pub use event::WallEvent;

// Re-export snapshot types
pub use snapshot::{CellRecord, WallSnapshot};

// Re-export time types
pub use time::WallTime;

// Re-export transform types
pub use transform::{euler_degrees_to_quat, CellTransform};
