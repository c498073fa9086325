//! Snapshot Types
//!
//! Serializable view of a generated wall, for observers that want plain data
//! instead of live cell handles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{CellId, CellTransform, GridIndex};

/// Everything the layout knows about one spawned cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub id: CellId,
    pub index: GridIndex,
    pub normalized: Vec2,
    pub transform: CellTransform,
}

impl CellRecord {
    /// Creates a record, deriving the id from the index.
    pub fn new(index: GridIndex, normalized: Vec2, transform: CellTransform) -> Self {
        Self {
            id: index.id(),
            index,
            normalized,
            transform,
        }
    }
}

/// Layout of the wall at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSnapshot {
    pub populated: bool,
    pub column_count: u32,
    pub row_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<CellRecord>,
}

impl WallSnapshot {
    /// Creates an empty snapshot for a grid of the given size.
    pub fn empty(column_count: u32, row_count: u32) -> Self {
        Self {
            populated: false,
            column_count,
            row_count,
            cells: Vec::new(),
        }
    }

    /// Finds the record for a cell id.
    pub fn cell(&self, id: CellId) -> Option<&CellRecord> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Serializes the snapshot as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_cell_record_derives_id() {
        let record = CellRecord::new(
            GridIndex::new(1, 2),
            Vec2::new(0.5, 1.0),
            CellTransform::default(),
        );
        assert_eq!(record.id, CellId(203));
    }

    #[test]
    fn test_empty_snapshot_omits_cells() {
        let snapshot = WallSnapshot::empty(3, 3);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"populated":false,"column_count":3,"row_count":3}"#);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut snapshot = WallSnapshot::empty(3, 3);
        snapshot.populated = true;
        snapshot.cells.push(CellRecord::new(
            GridIndex::new(1, 1),
            Vec2::new(0.5, 0.5),
            CellTransform::new(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO),
        ));

        let value: serde_json::Value =
            serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        let cell = &value["cells"][0];
        assert_eq!(cell["id"], 202);
        assert_eq!(cell["index"]["x"], 1);
        assert_eq!(cell["transform"]["position"][2], 2.0);

        let parsed = WallSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(parsed.cell(CellId(202)).map(|c| c.index), Some(GridIndex::new(1, 1)));
    }
}
