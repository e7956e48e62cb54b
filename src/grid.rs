//! The track grid: typed cells and the fixed 2D array that holds them.

use crate::geometry::Heading;
use arrayvec::ArrayVec;

/// The set of headings a cell permits, at most one entry per heading.
pub type AllowedTurns = ArrayVec<Heading, 4>;

/// The traversal type of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellType {
    /// Not part of the track network.
    Empty,
    /// Plain track.
    Track,
    /// A switch preferring the left branch.
    SwitchLeft,
    /// A switch preferring the right branch.
    SwitchRight,
    /// Track with an occupancy sensor.
    Sensor,
}

impl CellType {
    /// Whether a train may occupy a cell of this type.
    pub fn is_traversable(self) -> bool {
        matches!(
            self,
            CellType::Track | CellType::SwitchLeft | CellType::SwitchRight | CellType::Sensor
        )
    }
}

/// One position on the track grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// The traversal type.
    cell_type: CellType,
    /// The headings a train may travel along while occupying this cell.
    allowed_turns: AllowedTurns,
}

impl Cell {
    /// Creates a new cell.
    pub fn new(cell_type: CellType, allowed_turns: impl IntoIterator<Item = Heading>) -> Self {
        Self {
            cell_type,
            allowed_turns: allowed_turns.into_iter().collect(),
        }
    }

    /// An empty, untraversable cell.
    pub fn empty() -> Self {
        Self::new(CellType::Empty, [])
    }

    /// The traversal type of the cell.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Whether a train occupying this cell may travel along `heading`.
    pub fn allows(&self, heading: Heading) -> bool {
        self.allowed_turns.contains(&heading)
    }
}

/// A grid coordinate, with `y` growing downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    /// Creates a new coordinate.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The coordinate one cell along `heading`, or `None` if that
    /// would leave the non-negative quadrant.
    pub fn step(self, heading: Heading) -> Option<CellCoord> {
        let (dx, dy) = heading.delta();
        let x = self.x as i64 + dx as i64;
        let y = self.y as i64 + dy as i64;
        if x < 0 || y < 0 {
            return None;
        }
        Some(CellCoord::new(x as usize, y as usize))
    }

    /// The delta from `other` to `self`.
    pub fn delta_from(self, other: CellCoord) -> (i32, i32) {
        (
            self.x as i32 - other.x as i32,
            self.y as i32 - other.y as i32,
        )
    }
}

/// The fixed 2D array of cells forming the track network.
///
/// Built once at startup and never mutated; the simulation reads it,
/// the map parser constructs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackGrid {
    /// The grid width in cells.
    width: usize,
    /// The grid height in cells.
    height: usize,
    /// The cells in row-major order.
    cells: Vec<Cell>,
}

impl TrackGrid {
    /// Creates a grid from row-major cells.
    ///
    /// # Panics
    /// Panics if `cells.len() != width * height`.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        assert_eq!(cells.len(), width * height, "cell count must match dimensions");
        Self {
            width,
            height,
            cells,
        }
    }

    /// The grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Gets the cell at `coord`, or `None` if out of bounds.
    pub fn get(&self, coord: CellCoord) -> Option<&Cell> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        Some(&self.cells[coord.y * self.width + coord.x])
    }

    /// Whether the cell at `coord` exists and can be occupied by a train.
    pub fn is_traversable(&self, coord: CellCoord) -> bool {
        self.get(coord)
            .map(|cell| cell.cell_type().is_traversable())
            .unwrap_or(false)
    }

    /// Iterates over all cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> {
        self.cells.iter().enumerate().map(|(idx, cell)| {
            let coord = CellCoord::new(idx % self.width, idx / self.width);
            (coord, cell)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn out_of_bounds_lookup() {
        let grid = TrackGrid::new(2, 1, vec![Cell::empty(), Cell::empty()]);
        assert!(grid.get(CellCoord::new(0, 0)).is_some());
        assert!(grid.get(CellCoord::new(2, 0)).is_none());
        assert!(grid.get(CellCoord::new(0, 1)).is_none());
    }

    #[test]
    fn step_clamps_at_origin() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.step(Heading::North), None);
        assert_eq!(origin.step(Heading::West), None);
        assert_eq!(origin.step(Heading::East), Some(CellCoord::new(1, 0)));
        assert_eq!(origin.step(Heading::South), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn traversable_types() {
        assert!(!CellType::Empty.is_traversable());
        assert!(CellType::Track.is_traversable());
        assert!(CellType::SwitchLeft.is_traversable());
        assert!(CellType::SwitchRight.is_traversable());
        assert!(CellType::Sensor.is_traversable());
    }
}
