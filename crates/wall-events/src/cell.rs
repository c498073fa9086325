//! Cell Addressing
//!
//! Grid indices, decimal cell identifiers and normalized coordinates.
//!
//! # Example
//!
//! ```
//! use wall_events::{CellId, GridIndex};
//!
//! let id = CellId::from_index(GridIndex::new(2, 4));
//! assert_eq!(id.value(), 305);
//! assert_eq!(id.to_index(), Some(GridIndex::new(2, 4)));
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Multiplier separating the column part of an id from the row part.
///
/// Ids only stay unique while both grid dimensions are below this value.
pub const ID_AXIS_STRIDE: u32 = 100;

/// Position of a cell in the grid (column `x`, row `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridIndex {
    pub x: u32,
    pub y: u32,
}

impl GridIndex {
    /// Creates a new GridIndex.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Returns the identifier encoding this index.
    pub fn id(self) -> CellId {
        CellId::from_index(self)
    }

    /// Returns true if this index is one of the four grid corners.
    pub fn is_corner(self, column_count: u32, row_count: u32) -> bool {
        let edge_x = self.x == 0 || self.x + 1 == column_count;
        let edge_y = self.y == 0 || self.y + 1 == row_count;
        edge_x && edge_y
    }

    /// Returns the index rescaled to [0,1]².
    pub fn normalized(self, column_count: u32, row_count: u32) -> Vec2 {
        normalized_coord(self, column_count, row_count)
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rescales a grid index to [0,1]².
///
/// Both counts must be at least 2.
pub fn normalized_coord(index: GridIndex, column_count: u32, row_count: u32) -> Vec2 {
    Vec2::new(
        index.x as f32 / (column_count - 1) as f32,
        index.y as f32 / (row_count - 1) as f32,
    )
}

/// Stable identifier of a cell: `(x + 1) * 100 + (y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u32);

impl CellId {
    /// Encodes a grid index as an identifier.
    pub fn from_index(index: GridIndex) -> Self {
        CellId((index.x + 1) * ID_AXIS_STRIDE + (index.y + 1))
    }

    /// Decodes the grid index, or None if the value encodes no valid index.
    pub fn to_index(self) -> Option<GridIndex> {
        let column = self.0 / ID_AXIS_STRIDE;
        let row = self.0 % ID_AXIS_STRIDE;
        if column == 0 || row == 0 {
            return None;
        }
        Some(GridIndex::new(column - 1, row - 1))
    }

    /// Returns the raw integer value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a CellId from a string.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseCellIdError {
    NotANumber(String),
    InvalidEncoding(u32),
}

impl fmt::Display for ParseCellIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCellIdError::NotANumber(s) => write!(f, "invalid cell id: '{}'", s),
            ParseCellIdError::InvalidEncoding(v) => {
                write!(f, "cell id {} does not encode a grid index", v)
            }
        }
    }
}

impl std::error::Error for ParseCellIdError {}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseCellIdError::NotANumber(s.to_string()))?;
        let id = CellId(value);
        id.to_index()
            .map(|_| id)
            .ok_or(ParseCellIdError::InvalidEncoding(value))
    }
}
