//! Curved wall geometry.
//!
//! Maps grid indices onto a surface bent by an independent fraction of a
//! quarter turn per axis. The x and y bends are summed into z, giving a blend
//! between a cylinder (one ratio small) and a sphere-like cap (both at 1.0).

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use wall_events::{CellTransform, GridIndex};

use crate::config::WallConfig;

/// One point of the wall surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub index: GridIndex,
    pub position: Vec3,
    /// Euler angles in degrees: (pitch, yaw, roll)
    pub rotation: Vec3,
}

impl GridPoint {
    /// Transform of a cell placed at this point.
    pub fn transform(&self, scale: Vec3) -> CellTransform {
        CellTransform::new(self.position, self.rotation).with_scale(scale)
    }
}

/// Maps an index along an axis of `count` slots onto [-1, 1].
///
/// An axis with fewer than two slots has its only point at the center.
pub fn axis_offset(index: u32, count: u32) -> f32 {
    match count.saturating_sub(1) {
        0 => 0.0,
        span => (2.0 * index as f32) / span as f32 - 1.0,
    }
}

/// Position of the grid point at `index`.
pub fn cell_position(config: &WallConfig, index: GridIndex) -> Vec3 {
    let angle_x = axis_offset(index.x, config.column_count) * FRAC_PI_2 * config.x_curve_ratio;
    let angle_y = axis_offset(index.y, config.row_count) * FRAC_PI_2 * config.y_curve_ratio;

    Vec3::new(
        angle_x.sin() * (config.wall_size.x / (2.0 * config.x_curve_ratio)),
        angle_y.sin() * (config.wall_size.y / (2.0 * config.y_curve_ratio)),
        config.wall_size.z * (angle_x.cos() + angle_y.cos()),
    )
}

/// Outward tilt of the grid point at `index`, as (pitch, yaw, roll) degrees.
pub fn cell_rotation(config: &WallConfig, index: GridIndex) -> Vec3 {
    let pitch = -axis_offset(index.y, config.row_count) * config.max_angle * config.y_curve_ratio;
    let yaw = axis_offset(index.x, config.column_count) * config.max_angle * config.x_curve_ratio;
    Vec3::new(pitch, yaw, 0.0)
}

/// Computes the full grid point at `index`.
pub fn grid_point(config: &WallConfig, index: GridIndex) -> GridPoint {
    GridPoint {
        index,
        position: cell_position(config, index),
        rotation: cell_rotation(config, index),
    }
}

/// Every index of the grid, row by row.
pub fn grid_indices(column_count: u32, row_count: u32) -> impl Iterator<Item = GridIndex> {
    (0..row_count).flat_map(move |y| (0..column_count).map(move |x| GridIndex::new(x, y)))
}

/// Computes every point of the wall, row by row.
pub fn layout(config: &WallConfig) -> Vec<GridPoint> {
    grid_indices(config.column_count, config.row_count)
        .map(|index| grid_point(config, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_degenerate_axis_is_centered() {
        assert_eq!(axis_offset(0, 1), 0.0);
        assert_eq!(axis_offset(0, 0), 0.0);
        assert_eq!(axis_offset(0, 2), -1.0);
        assert_eq!(axis_offset(1, 2), 1.0);
    }

    #[test]
    fn test_layout_of_unsanitized_single_column() {
        let config = WallConfig {
            column_count: 1,
            row_count: 3,
            ..WallConfig::default()
        };
        let points = layout(&config);

        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.position.x == 0.0 && p.rotation.y == 0.0));
    }

    fn three_by_three() -> WallConfig {
        WallConfig {
            row_count: 3,
            column_count: 3,
            wall_size: Vec3::new(2.0, 2.0, 1.0),
            x_curve_ratio: 1.0,
            y_curve_ratio: 1.0,
            max_angle: 90.0,
            cell_scale: Vec3::ONE,
        }
    }

    #[test]
    fn test_axis_offset_range() {
        assert_eq!(axis_offset(0, 5), -1.0);
        assert_eq!(axis_offset(2, 5), 0.0);
        assert_eq!(axis_offset(4, 5), 1.0);
    }

    #[test]
    fn test_center_cell() {
        let point = grid_point(&three_by_three(), GridIndex::new(1, 1));
        assert!(approx(point.position, Vec3::new(0.0, 0.0, 2.0)));
        assert_eq!(point.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_corner_point() {
        let point = grid_point(&three_by_three(), GridIndex::new(0, 0));
        assert!(approx(point.position, Vec3::new(-1.0, -1.0, 0.0)));
        assert_eq!(point.rotation, Vec3::new(90.0, -90.0, 0.0));
    }

    #[test]
    fn test_edge_yaw_is_max_angle() {
        let mut config = three_by_three();
        config.column_count = 7;
        config.max_angle = 35.0;
        assert_eq!(cell_rotation(&config, GridIndex::new(0, 1)).y, -35.0);
        assert_eq!(cell_rotation(&config, GridIndex::new(6, 1)).y, 35.0);
    }

    #[test]
    fn test_flatter_ratio_tilts_less() {
        let mut config = three_by_three();
        config.x_curve_ratio = 0.5;
        let rotation = cell_rotation(&config, GridIndex::new(2, 1));
        assert_eq!(rotation.y, 45.0);
    }

    #[test]
    fn test_small_ratio_approaches_flat_extent() {
        let mut config = three_by_three();
        config.x_curve_ratio = 0.001;
        let edge = cell_position(&config, GridIndex::new(2, 1));
        // Arc length is preserved, so a nearly flat wall spans about wall_size.x * pi / 4 per side.
        assert!((edge.x - FRAC_PI_2).abs() < 1e-2);
    }

    #[test]
    fn test_grid_indices_row_major() {
        let indices: Vec<GridIndex> = grid_indices(3, 2).collect();
        assert_eq!(indices.len(), 6);
        assert_eq!(indices[0], GridIndex::new(0, 0));
        assert_eq!(indices[1], GridIndex::new(1, 0));
        assert_eq!(indices[3], GridIndex::new(0, 1));
    }

    #[test]
    fn test_layout_point_count() {
        let mut config = three_by_three();
        config.column_count = 5;
        config.row_count = 4;
        assert_eq!(layout(&config).len(), 20);
    }
}
