//! Pointer feedback: a short color flash on the laser and cursor when the
//! player shoots.

use serde::{Deserialize, Serialize};
use wall_events::WallTime;

use crate::config::PointerConfig;
use crate::schedule::DelayedTask;

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Colors shown by the laser line and its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserColors {
    pub start: Rgba,
    pub end: Rgba,
    pub cursor: Rgba,
}

impl LaserColors {
    /// Same color on every part.
    pub fn uniform(color: Rgba) -> Self {
        Self {
            start: color,
            end: color,
            cursor: color,
        }
    }
}

impl Default for LaserColors {
    fn default() -> Self {
        Self {
            start: Rgba::WHITE,
            end: Rgba::CLEAR,
            cursor: Rgba::WHITE,
        }
    }
}

/// Whatever draws the laser. Only its colors are driven from here.
pub trait LaserVisual {
    fn colors(&self) -> LaserColors;
    fn set_colors(&mut self, colors: LaserColors);
}

impl LaserVisual for LaserColors {
    fn colors(&self) -> LaserColors {
        *self
    }

    fn set_colors(&mut self, colors: LaserColors) {
        *self = colors;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerState {
    Idle,
    Flashing,
}

/// Flashes the laser on shoot, then restores its baseline colors.
#[derive(Debug)]
pub struct PointerFeedback<L: LaserVisual> {
    config: PointerConfig,
    visual: L,
    baseline: Option<LaserColors>,
    revert: DelayedTask,
    now: WallTime,
}

impl<L: LaserVisual> PointerFeedback<L> {
    pub fn new(config: PointerConfig, visual: L) -> Self {
        Self {
            config,
            visual,
            baseline: None,
            revert: DelayedTask::new(),
            now: WallTime::start(),
        }
    }

    /// Shows the shoot color and (re)starts the revert timer.
    ///
    /// A shot during a flash keeps the colors captured before the first one.
    pub fn shoot(&mut self) {
        if self.baseline.is_none() {
            self.baseline = Some(self.visual.colors());
        }
        self.visual
            .set_colors(LaserColors::uniform(self.config.shoot_color));
        self.revert.start(self.now, self.config.flash_duration);
    }

    /// Advances time and restores the baseline once the flash is over.
    pub fn update(&mut self, dt: f32) {
        self.now.advance(dt as f64);
        if self.revert.poll(self.now) {
            if let Some(baseline) = self.baseline.take() {
                self.visual.set_colors(baseline);
            }
        }
    }

    pub fn state(&self) -> PointerState {
        if self.revert.is_pending() {
            PointerState::Flashing
        } else {
            PointerState::Idle
        }
    }

    pub fn visual(&self) -> &L {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut L {
        &mut self.visual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback() -> PointerFeedback<LaserColors> {
        PointerFeedback::new(PointerConfig::default(), LaserColors::default())
    }

    #[test]
    fn test_shoot_sets_shoot_color() {
        let mut pointer = feedback();
        pointer.shoot();

        assert_eq!(pointer.state(), PointerState::Flashing);
        assert_eq!(*pointer.visual(), LaserColors::uniform(Rgba::RED));
    }

    #[test]
    fn test_reverts_after_flash() {
        let mut pointer = feedback();
        pointer.shoot();

        pointer.update(0.05);
        assert_eq!(pointer.state(), PointerState::Flashing);

        pointer.update(0.06);
        assert_eq!(pointer.state(), PointerState::Idle);
        assert_eq!(*pointer.visual(), LaserColors::default());
    }

    #[test]
    fn test_retrigger_restarts_timer_and_keeps_baseline() {
        let mut pointer = feedback();
        pointer.shoot();
        pointer.update(0.08);
        pointer.shoot();

        // The first flash would have ended here
        pointer.update(0.04);
        assert_eq!(pointer.state(), PointerState::Flashing);
        assert_eq!(pointer.visual().cursor, Rgba::RED);

        pointer.update(0.08);
        assert_eq!(pointer.state(), PointerState::Idle);
        assert_eq!(*pointer.visual(), LaserColors::default());
    }

    #[test]
    fn test_baseline_follows_visual_between_flashes() {
        let mut pointer = feedback();
        let blue = LaserColors::uniform(Rgba::new(0.0, 0.0, 1.0, 1.0));
        pointer.visual_mut().set_colors(blue);

        pointer.shoot();
        pointer.update(0.2);
        assert_eq!(*pointer.visual(), blue);
    }
}
