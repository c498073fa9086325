//! Wall Time
//!
//! Monotonic time on the cooperative update loop, in seconds.
//!
//! # Example
//!
//! ```
//! use wall_events::WallTime;
//!
//! let mut now = WallTime::start();
//! now.advance(0.25);
//! assert_eq!(now.seconds(), 0.25);
//! assert_eq!(now.to_string(), "t=0.250");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A point in time on the update loop.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallTime(f64);

impl WallTime {
    /// Creates a WallTime at the given number of seconds.
    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    /// The start of the update loop.
    pub fn start() -> Self {
        Self(0.0)
    }

    /// Advances by `dt` seconds. Negative steps are ignored.
    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.0 += dt;
        }
    }

    /// Returns the time in seconds.
    pub fn seconds(self) -> f64 {
        self.0
    }
}

impl Add<f64> for WallTime {
    type Output = WallTime;

    fn add(self, rhs: f64) -> WallTime {
        WallTime(self.0 + rhs)
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_ignores_negative_steps() {
        let mut now = WallTime::from_seconds(1.0);
        now.advance(-0.5);
        assert_eq!(now.seconds(), 1.0);
        now.advance(0.5);
        assert_eq!(now.seconds(), 1.5);
    }

    #[test]
    fn test_ordering() {
        let deadline = WallTime::start() + 0.1;
        assert!(WallTime::from_seconds(0.05) < deadline);
        assert!(WallTime::from_seconds(0.1) >= deadline);
    }

    #[test]
    fn test_serializes_as_seconds() {
        let json = serde_json::to_string(&WallTime::from_seconds(1.5)).unwrap();
        assert_eq!(json, "1.5");
    }
}
