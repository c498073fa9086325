//! Wall Layout Engine
//!
//! Owns the wall configuration and every spawned cell. Generation walks the
//! grid once, feeding every point to the mesh builder and spawning a cell for
//! every point except the four corners.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──initialize()──▶ Initialized
//!
//!            enable()                      clear()
//! Empty ───────────────▶ Populated ───────────────▶ Empty
//!   (generates when empty)        (destroys every cell)
//! ```
//!
//! Activity is orthogonal: `enable()` sets it, `disable()` and `clear()`
//! drop it. Activation calls are ignored while inactive.
//!
//! Parameter edits go through the `update_*` setters, which validate each
//! field and silently ignore out-of-domain values. They never rebuild by
//! themselves; `on_parameters_changed()` starts a debounce and the wall is
//! rebuilt once the edits go quiet.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use wall_events::{CellId, CellRecord, WallEvent, WallSnapshot, WallTime};

use crate::cell::{CellEntity, CellFactory};
use crate::config::{EngineConfig, WallConfig};
use crate::events::PendingEvents;
use crate::geometry;
use crate::mesh::MeshBuilder;
use crate::schedule::DelayedTask;

/// A spawned cell and the layout data it was created from.
#[derive(Debug, Clone, PartialEq)]
pub struct WallCell<C> {
    pub record: CellRecord,
    pub entity: C,
}

/// Live cells keyed by id.
pub type CellMap<C> = BTreeMap<CellId, WallCell<C>>;

/// Change-notification listener: `(populated, cells)`.
pub type WallListener<C> = Box<dyn FnMut(bool, &CellMap<C>)>;

/// Lays out, spawns and drives the cells of a curved wall.
pub struct WallLayoutEngine<F: CellFactory, M: MeshBuilder> {
    config: WallConfig,
    rebuild_delay: f64,
    factory: F,
    mesh: M,
    cells: CellMap<F::Cell>,
    active: bool,
    initialized: bool,
    now: WallTime,
    rebuild: DelayedTask,
    rng: SmallRng,
    listeners: Vec<WallListener<F::Cell>>,
    events: PendingEvents,
    generation: u64,
}

impl<F: CellFactory, M: MeshBuilder> WallLayoutEngine<F, M> {
    /// Creates an engine with default timing and seed.
    pub fn new(config: WallConfig, factory: F, mesh: M) -> Self {
        Self::with_engine_config(config, &EngineConfig::default(), factory, mesh)
    }

    /// Creates an engine. Invalid geometry values fall back to defaults.
    pub fn with_engine_config(
        config: WallConfig,
        engine: &EngineConfig,
        factory: F,
        mesh: M,
    ) -> Self {
        Self {
            config: WallConfig::sanitized(&config),
            rebuild_delay: engine.rebuild_delay.max(0.0),
            factory,
            mesh,
            cells: BTreeMap::new(),
            active: false,
            initialized: false,
            now: WallTime::start(),
            rebuild: DelayedTask::new(),
            rng: SmallRng::seed_from_u64(engine.seed),
            listeners: Vec::new(),
            events: PendingEvents::new(),
            generation: 0,
        }
    }

    /// One-time setup. Parameter-change rebuilds are ignored until this runs.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        tracing::debug!(
            "Wall initialized: {}x{} grid",
            self.config.column_count,
            self.config.row_count
        );
    }

    /// Registers a listener called with `(populated, cells)` after every
    /// generation and every clear.
    pub fn subscribe(&mut self, listener: impl FnMut(bool, &CellMap<F::Cell>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Activates the wall, generating it first if it has no cells.
    pub fn enable(&mut self) {
        self.active = true;
        if self.cells.is_empty() {
            self.generate_wall();
        }
    }

    /// Deactivates the wall and resets every cell, keeping them alive.
    pub fn disable(&mut self) {
        self.active = false;
        for cell in self.cells.values_mut() {
            cell.entity.reset();
        }
    }

    /// Deactivates the wall and destroys every cell.
    pub fn clear(&mut self) {
        self.active = false;
        let cells = std::mem::take(&mut self.cells);
        let removed = cells.len();
        for (_, cell) in cells {
            self.factory.despawn(cell.entity);
        }
        tracing::debug!("Wall cleared, {} cells destroyed", removed);
        self.events.push(WallEvent::WallCleared {
            at: self.now,
            removed,
        });
        self.notify(false);
    }

    /// Activates a random activatable cell. Returns the chosen id.
    ///
    /// Ignored while inactive or when the wall has no cells. Otherwise cells
    /// are sampled uniformly until one reports `can_be_activated()`.
    ///
    /// # Precondition
    ///
    /// At least one cell must be activatable. If none is, this call never
    /// returns.
    pub fn activate_random(
        &mut self,
        life_time: f32,
        expiring_duration: f32,
        is_fake: bool,
    ) -> Option<CellId> {
        if !self.active || self.cells.is_empty() {
            return None;
        }

        let ids: Vec<CellId> = self.cells.keys().copied().collect();
        let id = loop {
            let candidate = ids[self.rng.gen_range(0..ids.len())];
            if self.cells[&candidate].entity.can_be_activated() {
                break candidate;
            }
        };

        self.activate(id, life_time, expiring_duration, is_fake);
        Some(id)
    }

    /// Activates the cell with the given id. Returns false if the wall is
    /// inactive or the id is unknown.
    pub fn activate_specific(
        &mut self,
        id: CellId,
        life_time: f32,
        expiring_duration: f32,
        is_fake: bool,
    ) -> bool {
        if !self.active || !self.cells.contains_key(&id) {
            return false;
        }
        self.activate(id, life_time, expiring_duration, is_fake);
        true
    }

    fn activate(&mut self, id: CellId, life_time: f32, expiring_duration: f32, is_fake: bool) {
        if let Some(cell) = self.cells.get_mut(&id) {
            cell.entity.enable(life_time, expiring_duration, is_fake);
            self.events.push(WallEvent::CellActivated {
                at: self.now,
                cell_id: id,
                life_time,
                expiring_duration,
                is_fake,
            });
        }
    }

    /// Pauses or resumes every cell, whether or not the wall is active.
    pub fn set_pause(&mut self, paused: bool) {
        for cell in self.cells.values_mut() {
            cell.entity.set_pause(paused);
        }
        self.events.push(WallEvent::PauseChanged {
            at: self.now,
            paused,
        });
    }

    /// Sets row and column counts. Values outside [2, 99] are ignored.
    pub fn update_grid_size(&mut self, row_count: Option<u32>, column_count: Option<u32>) {
        self.config.update_grid_size(row_count, column_count);
    }

    /// Sets the wall extent per component. Negative values are ignored.
    pub fn update_wall_size(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.config.update_wall_size(x, y, z);
    }

    /// Sets the curvature ratios. Values outside (0, 1] are ignored.
    pub fn update_curve_ratio(&mut self, x_ratio: Option<f32>, y_ratio: Option<f32>) {
        self.config.update_curve_ratio(x_ratio, y_ratio);
    }

    /// Sets the edge tilt. Values outside [0, 90] are ignored.
    pub fn update_max_angle(&mut self, max_angle: Option<f32>) {
        self.config.update_max_angle(max_angle);
    }

    /// Sets the cell scale per component. Negative values are ignored.
    pub fn update_cell_scale(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.config.update_cell_scale(x, y, z);
    }

    /// Schedules a rebuild once parameter edits go quiet.
    ///
    /// Ignored unless the wall is active and initialized. Each call cancels
    /// the pending rebuild and restarts the wait.
    pub fn on_parameters_changed(&mut self) {
        if !self.active || !self.initialized {
            return;
        }
        let restarted = self.rebuild.cancel();
        let due = self.rebuild.start(self.now, self.rebuild_delay);
        if restarted {
            tracing::debug!("Rebuild postponed to {}", due);
        }
        self.events.push(WallEvent::RebuildScheduled {
            at: self.now,
            due,
        });
    }

    /// Advances time: ticks every cell, then runs a due rebuild.
    pub fn update(&mut self, dt: f32) {
        self.now.advance(dt as f64);
        for cell in self.cells.values_mut() {
            cell.entity.tick(dt);
        }
        if self.rebuild.poll(self.now) && self.active {
            tracing::info!("Rebuilding wall after parameter change");
            self.clear();
            self.enable();
        }
    }

    fn generate_wall(&mut self) {
        let columns = self.config.column_count;
        let rows = self.config.row_count;
        self.mesh.init_point_lists(columns, rows);

        for point in geometry::layout(&self.config) {
            self.mesh
                .add_point(point.index.x, point.index.y, point.position, point.rotation);
            if point.index.is_corner(columns, rows) {
                continue;
            }

            let record = CellRecord::new(
                point.index,
                point.index.normalized(columns, rows),
                point.transform(self.config.cell_scale),
            );
            let mut entity = self.factory.spawn(&record);
            entity.set_id(record.id);
            entity.set_normalized_index(record.normalized);
            self.cells.insert(record.id, WallCell { record, entity });
        }

        self.generation += 1;
        tracing::info!(
            "Generated {}x{} wall with {} cells",
            columns,
            rows,
            self.cells.len()
        );
        self.events.push(WallEvent::WallGenerated {
            at: self.now,
            column_count: columns,
            row_count: rows,
            cell_count: self.cells.len(),
        });
        self.notify(true);
        self.mesh.generate_wall();
    }

    fn notify(&mut self, populated: bool) {
        for listener in self.listeners.iter_mut() {
            listener(populated, &self.cells);
        }
    }

    /// Plain-data view of the current layout.
    pub fn snapshot(&self) -> WallSnapshot {
        WallSnapshot {
            populated: !self.cells.is_empty(),
            column_count: self.config.column_count,
            row_count: self.config.row_count,
            cells: self.cells.values().map(|c| c.record.clone()).collect(),
        }
    }

    /// Takes the events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<WallEvent> {
        self.events.drain()
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    pub fn cells(&self) -> &CellMap<F::Cell> {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&F::Cell> {
        self.cells.get(&id).map(|c| &c.entity)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut F::Cell> {
        self.cells.get_mut(&id).map(|c| &mut c.entity)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_populated(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn has_pending_rebuild(&self) -> bool {
        self.rebuild.is_pending()
    }

    pub fn now(&self) -> WallTime {
        self.now
    }

    /// Number of walls generated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}
