//! Cell entity contract and a timer-driven reference cell.
//!
//! The layout engine never looks inside a cell: it assigns identity once,
//! forwards activation, reset and pause calls, and asks whether a cell can
//! currently be activated. `TimedCell` is a small implementation used by the
//! CLI and the tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use wall_events::{CellId, CellRecord, CellTransform};

/// A target on the wall, as seen by the layout engine.
pub trait CellEntity {
    /// One-time identity assignment at creation.
    fn set_id(&mut self, id: CellId);

    /// One-time normalized coordinate assignment at creation.
    fn set_normalized_index(&mut self, coord: Vec2);

    /// Activates the cell for `life_time`, then lets it expire over
    /// `expiring_duration`. A fake cell is a decoy.
    fn enable(&mut self, life_time: f32, expiring_duration: f32, is_fake: bool);

    /// Forces the cell back to its inactive baseline.
    fn reset(&mut self);

    /// Pauses or resumes internal timers.
    fn set_pause(&mut self, paused: bool);

    /// Whether the cell may be activated right now.
    fn can_be_activated(&self) -> bool;

    /// Advances internal timers. Cells that are driven elsewhere ignore this.
    fn tick(&mut self, _dt: f32) {}
}

/// Creates and destroys cell entities for the engine.
pub trait CellFactory {
    type Cell: CellEntity;

    /// Creates the cell described by `record`.
    fn spawn(&mut self, record: &CellRecord) -> Self::Cell;

    /// Destroys a cell removed from the wall.
    fn despawn(&mut self, cell: Self::Cell) {
        drop(cell);
    }
}

impl<C, F> CellFactory for F
where
    C: CellEntity,
    F: FnMut(&CellRecord) -> C,
{
    type Cell = C;

    fn spawn(&mut self, record: &CellRecord) -> C {
        self(record)
    }
}

/// Activation phase of a `TimedCell`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CellState {
    /// Waiting to be activated
    Idle,
    /// Up and hittable
    Active {
        remaining: f32,
        expiring_duration: f32,
    },
    /// Going back down
    Expiring { remaining: f32 },
}

/// Reference cell: counts down its life time, then its expiry, then idles.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedCell {
    id: Option<CellId>,
    normalized: Vec2,
    transform: CellTransform,
    state: CellState,
    is_fake: bool,
    paused: bool,
    activations: u32,
}

impl TimedCell {
    pub fn new(transform: CellTransform) -> Self {
        Self {
            id: None,
            normalized: Vec2::ZERO,
            transform,
            state: CellState::Idle,
            is_fake: false,
            paused: false,
            activations: 0,
        }
    }

    /// Spawns a cell at the record's transform. Identity is assigned by the engine.
    pub fn from_record(record: &CellRecord) -> Self {
        Self::new(record.transform)
    }

    pub fn id(&self) -> Option<CellId> {
        self.id
    }

    pub fn normalized(&self) -> Vec2 {
        self.normalized
    }

    pub fn transform(&self) -> &CellTransform {
        &self.transform
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_fake(&self) -> bool {
        self.is_fake
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of times the cell has been enabled.
    pub fn activation_count(&self) -> u32 {
        self.activations
    }
}

impl CellEntity for TimedCell {
    fn set_id(&mut self, id: CellId) {
        self.id = Some(id);
    }

    fn set_normalized_index(&mut self, coord: Vec2) {
        self.normalized = coord;
    }

    fn enable(&mut self, life_time: f32, expiring_duration: f32, is_fake: bool) {
        self.state = CellState::Active {
            remaining: life_time.max(0.0),
            expiring_duration: expiring_duration.max(0.0),
        };
        self.is_fake = is_fake;
        self.activations += 1;
    }

    fn reset(&mut self) {
        self.state = CellState::Idle;
        self.is_fake = false;
    }

    fn set_pause(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn can_be_activated(&self) -> bool {
        self.state == CellState::Idle
    }

    fn tick(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        self.state = match self.state {
            CellState::Idle => CellState::Idle,
            CellState::Active {
                remaining,
                expiring_duration,
            } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    CellState::Active {
                        remaining,
                        expiring_duration,
                    }
                } else {
                    CellState::Expiring {
                        remaining: expiring_duration,
                    }
                }
            }
            CellState::Expiring { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    CellState::Expiring { remaining }
                } else {
                    CellState::Idle
                }
            }
        };
    }
}
