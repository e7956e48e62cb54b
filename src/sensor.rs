//! Sensor occupancy, derived from train bodies each tick.

use crate::grid::{CellCoord, CellType, TrackGrid};
use std::collections::HashMap;

/// Occupancy of the grid's sensor cells.
///
/// The key domain is fixed at construction: one entry per sensor cell
/// in the grid. Only the values change, recomputed from scratch from
/// the current train bodies after every tick.
#[derive(Clone, Debug, Default)]
pub struct SensorRegistry {
    /// Occupancy per sensor coordinate.
    states: HashMap<CellCoord, bool>,
}

impl SensorRegistry {
    /// Creates a registry with one unoccupied entry per sensor cell.
    pub(crate) fn new(grid: &TrackGrid) -> Self {
        let states = grid
            .iter()
            .filter(|(_, cell)| cell.cell_type() == CellType::Sensor)
            .map(|(coord, _)| (coord, false))
            .collect();
        Self { states }
    }

    /// Whether the sensor at `coord` is occupied, or `None` if no
    /// sensor exists there.
    pub fn is_occupied(&self, coord: CellCoord) -> Option<bool> {
        self.states.get(&coord).copied()
    }

    /// Iterates over all sensors and their occupancy.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, bool)> + '_ {
        self.states.iter().map(|(coord, occupied)| (*coord, *occupied))
    }

    /// The number of sensors on the grid.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the grid has no sensors.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Recomputes occupancy from the given body coordinates.
    pub(crate) fn recompute(&mut self, bodies: impl Iterator<Item = CellCoord>) {
        for occupied in self.states.values_mut() {
            *occupied = false;
        }
        for coord in bodies {
            if let Some(occupied) = self.states.get_mut(&coord) {
                *occupied = true;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::map::parse_map;

    #[test]
    fn domain_is_fixed_by_the_grid() {
        let grid = parse_map("-s-s-").unwrap();
        let sensors = SensorRegistry::new(&grid);
        assert_eq!(sensors.len(), 2);
        assert_eq!(sensors.is_occupied(CellCoord::new(1, 0)), Some(false));
        assert_eq!(sensors.is_occupied(CellCoord::new(3, 0)), Some(false));
        assert_eq!(sensors.is_occupied(CellCoord::new(0, 0)), None);
    }

    #[test]
    fn recompute_is_from_scratch() {
        let grid = parse_map("-s-s-").unwrap();
        let mut sensors = SensorRegistry::new(&grid);

        sensors.recompute([CellCoord::new(1, 0)].into_iter());
        assert_eq!(sensors.is_occupied(CellCoord::new(1, 0)), Some(true));
        assert_eq!(sensors.is_occupied(CellCoord::new(3, 0)), Some(false));

        // A body leaving the sensor resets it.
        sensors.recompute([CellCoord::new(2, 0)].into_iter());
        assert_eq!(sensors.is_occupied(CellCoord::new(1, 0)), Some(false));
    }

    #[test]
    fn non_sensor_bodies_are_ignored() {
        let grid = parse_map("-s-").unwrap();
        let mut sensors = SensorRegistry::new(&grid);
        sensors.recompute([CellCoord::new(0, 0), CellCoord::new(2, 0)].into_iter());
        assert_eq!(sensors.is_occupied(CellCoord::new(1, 0)), Some(false));
        assert_eq!(sensors.is_occupied(CellCoord::new(0, 0)), None);
    }
}
