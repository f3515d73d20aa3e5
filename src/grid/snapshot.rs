use super::LifeGrid;
use serde::{Deserialize, Serialize};

/// Plain structural copy of a grid, suitable for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
    #[error("a {width}x{height} grid needs {expected} cells, got {actual}")]
    CellCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

impl LifeGrid {
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            generation: self.generation,
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
        }
    }
}

impl From<LifeGrid> for GridSnapshot {
    fn from(grid: LifeGrid) -> Self {
        Self {
            generation: grid.generation,
            width: grid.width,
            height: grid.height,
            cells: grid.cells,
        }
    }
}

impl TryFrom<GridSnapshot> for LifeGrid {
    type Error = SnapshotError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        let GridSnapshot {
            generation,
            width,
            height,
            cells,
        } = snapshot;

        if width == 0 || height == 0 {
            return Err(SnapshotError::EmptyDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(SnapshotError::CellCount {
                width,
                height,
                expected: usize::MAX,
                actual: cells.len(),
            })?;
        if cells.len() != expected {
            return Err(SnapshotError::CellCount {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            generation,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pos2;

    #[test]
    fn snapshot_restores_the_same_grid() {
        let grid = LifeGrid::from_alive(4, 3, [Pos2::new(1, 1), Pos2::new(3, 2)])
            .next_generation()
            .next_generation();

        let restored = LifeGrid::try_from(grid.snapshot()).expect("valid snapshot");

        assert_eq!(restored, grid);
        assert_eq!(restored.generation(), 2);
    }

    #[test]
    fn mismatched_cell_count_is_rejected() {
        let snapshot = GridSnapshot {
            generation: 0,
            width: 3,
            height: 3,
            cells: vec![false; 8],
        };

        assert_eq!(
            LifeGrid::try_from(snapshot),
            Err(SnapshotError::CellCount {
                width: 3,
                height: 3,
                expected: 9,
                actual: 8,
            })
        );
    }

    #[test]
    fn zero_width_is_rejected() {
        let snapshot = GridSnapshot {
            generation: 4,
            width: 0,
            height: 5,
            cells: Vec::new(),
        };

        assert!(matches!(
            LifeGrid::try_from(snapshot),
            Err(SnapshotError::EmptyDimensions { .. })
        ));
    }
}
