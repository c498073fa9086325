//! Cell Transform
//!
//! Wall-local placement of a cell: position, Euler rotation and scale.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Wall-local transform of one grid point.
///
/// `rotation` holds Euler angles in degrees as (pitch, yaw, roll).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl CellTransform {
    /// Creates a transform with unit scale.
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Returns a copy with the given scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation as a quaternion: roll first, then pitch, then yaw.
    pub fn quat(&self) -> Quat {
        euler_degrees_to_quat(self.rotation)
    }

    /// Direction the cell faces (local +Z after rotation).
    pub fn facing(&self) -> Vec3 {
        self.quat() * Vec3::Z
    }
}

impl Default for CellTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }
}

/// Converts (pitch, yaw, roll) degrees to a quaternion.
pub fn euler_degrees_to_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        rotation.y.to_radians(),
        rotation.x.to_radians(),
        rotation.z.to_radians(),
    )
}
