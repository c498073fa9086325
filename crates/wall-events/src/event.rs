//! Event Types
//!
//! Plain-data record of what the layout engine did, one variant per
//! observable lifecycle step.

use serde::{Deserialize, Serialize};

use crate::{CellId, WallTime};

/// Lifecycle events emitted by the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WallEvent {
    /// A full grid was generated.
    WallGenerated {
        at: WallTime,
        column_count: u32,
        row_count: u32,
        cell_count: usize,
    },
    /// Every cell was destroyed.
    WallCleared { at: WallTime, removed: usize },
    /// A cell was activated.
    CellActivated {
        at: WallTime,
        cell_id: CellId,
        life_time: f32,
        expiring_duration: f32,
        is_fake: bool,
    },
    /// Pause state was broadcast to all cells.
    PauseChanged { at: WallTime, paused: bool },
    /// A parameter edit (re)started the rebuild countdown.
    RebuildScheduled { at: WallTime, due: WallTime },
}

impl WallEvent {
    /// Returns when the event happened.
    pub fn at(&self) -> WallTime {
        match self {
            WallEvent::WallGenerated { at, .. }
            | WallEvent::WallCleared { at, .. }
            | WallEvent::CellActivated { at, .. }
            | WallEvent::PauseChanged { at, .. }
            | WallEvent::RebuildScheduled { at, .. } => *at,
        }
    }

    /// Serializes the event to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
