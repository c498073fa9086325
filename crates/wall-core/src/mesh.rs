//! Surface mesh contract and a quad-grid builder.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use wall_events::euler_degrees_to_quat;

/// Receives every grid point of a generated wall, corners included.
pub trait MeshBuilder {
    /// Allocates (or resets) the point buffer for a grid.
    fn init_point_lists(&mut self, column_count: u32, row_count: u32);

    /// Records one grid point. `rotation` is (pitch, yaw, roll) in degrees.
    fn add_point(&mut self, x: u32, y: u32, position: Vec3, rotation: Vec3);

    /// Builds the surface from the recorded points.
    fn generate_wall(&mut self);
}

/// Triangulated wall surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    pub column_count: u32,
    pub row_count: u32,
    /// One vertex per grid point, row by row
    pub vertices: Vec<Vec3>,
    /// Facing direction of each vertex
    pub normals: Vec<Vec3>,
    /// Two triangles per grid quad
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RecordedPoint {
    position: Vec3,
    rotation: Vec3,
}

/// Collects grid points and stitches them into a `SurfaceMesh`.
#[derive(Debug, Clone, Default)]
pub struct PointGridMesh {
    column_count: u32,
    row_count: u32,
    points: Vec<Option<RecordedPoint>>,
    surface: Option<SurfaceMesh>,
    builds: u32,
}

impl PointGridMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points recorded since the last reset.
    pub fn point_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// Recorded position of the point at `(x, y)`.
    pub fn position(&self, x: u32, y: u32) -> Option<Vec3> {
        self.slot(x, y)
            .and_then(|i| self.points[i])
            .map(|p| p.position)
    }

    /// The last successfully built surface.
    pub fn surface(&self) -> Option<&SurfaceMesh> {
        self.surface.as_ref()
    }

    /// Number of surfaces built so far.
    pub fn build_count(&self) -> u32 {
        self.builds
    }

    fn slot(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.column_count && y < self.row_count {
            Some((y * self.column_count + x) as usize)
        } else {
            None
        }
    }
}

impl MeshBuilder for PointGridMesh {
    fn init_point_lists(&mut self, column_count: u32, row_count: u32) {
        self.column_count = column_count;
        self.row_count = row_count;
        self.points = vec![None; (column_count * row_count) as usize];
        self.surface = None;
    }

    fn add_point(&mut self, x: u32, y: u32, position: Vec3, rotation: Vec3) {
        match self.slot(x, y) {
            Some(i) => self.points[i] = Some(RecordedPoint { position, rotation }),
            None => tracing::debug!("Ignoring mesh point ({}, {}) outside the grid", x, y),
        }
    }

    fn generate_wall(&mut self) {
        let missing = self.points.len() - self.point_count();
        if missing > 0 || self.column_count < 2 || self.row_count < 2 {
            tracing::warn!(
                "Cannot build wall surface: {} of {} points missing",
                missing,
                self.points.len()
            );
            return;
        }

        let points: Vec<RecordedPoint> = self.points.iter().flatten().copied().collect();
        let vertices = points.iter().map(|p| p.position).collect();
        let normals = points
            .iter()
            .map(|p| euler_degrees_to_quat(p.rotation) * Vec3::Z)
            .collect();

        let columns = self.column_count;
        let mut indices = Vec::with_capacity(((columns - 1) * (self.row_count - 1) * 6) as usize);
        for y in 0..self.row_count - 1 {
            for x in 0..columns - 1 {
                let a = y * columns + x;
                let b = a + 1;
                let c = a + columns;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        self.surface = Some(SurfaceMesh {
            column_count: columns,
            row_count: self.row_count,
            vertices,
            normals,
            indices,
        });
        self.builds += 1;
    }
}
