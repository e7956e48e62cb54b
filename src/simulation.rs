//! The simulation engine: owns the trains, advances them each tick,
//! recomputes sensor occupancy and detects collisions.

use crate::grid::{CellCoord, TrackGrid};
use crate::sensor::SensorRegistry;
use crate::snapshot::WorldSnapshot;
use crate::train::{Train, TrainAttributes, TrainStatus};
use crate::{Heading, TrainId, TrainSet};
use arrayvec::ArrayVec;
use itertools::Itertools;
use log::{debug, info};

/// A train simulation over a fixed track grid.
pub struct Simulation {
    /// The track network; immutable for the simulation's lifetime.
    grid: TrackGrid,
    /// The trains being simulated.
    trains: TrainSet,
    /// Occupancy of the grid's sensor cells.
    sensors: SensorRegistry,
    /// The current tick of simulation.
    tick: u64,
}

impl Simulation {
    /// Creates a new simulation over the given grid,
    /// discovering its sensor cells.
    pub fn new(grid: TrackGrid) -> Self {
        let sensors = SensorRegistry::new(&grid);
        Self {
            grid,
            trains: TrainSet::default(),
            sensors,
            tick: 0,
        }
    }

    /// Adds a train to the simulation with its body collapsed onto
    /// the starting head position.
    ///
    /// # Panics
    /// Panics if `head` is not on the grid.
    pub fn add_train(
        &mut self,
        attributes: &TrainAttributes,
        head: CellCoord,
        heading: Heading,
    ) -> TrainId {
        assert!(
            self.grid.get(head).is_some(),
            "train head must be on the grid"
        );
        let id = self
            .trains
            .insert_with_key(|id| Train::new(id, attributes, head, heading));
        info!("added train {:?} at {:?} heading {:?}", id, head, heading);
        id
    }

    /// Sets whether a train is being driven forward.
    /// Takes effect from the next tick.
    pub fn set_train_accelerating(&mut self, train_id: TrainId, accelerating: bool) {
        self.trains[train_id].accelerating = accelerating;
    }

    /// Gets whether a train is being driven forward.
    pub fn get_train_accelerating(&self, train_id: TrainId) -> bool {
        self.trains[train_id].accelerating
    }

    /// Advances the simulation by one tick: moves every train by its
    /// rounded speed, integrates speeds, then recomputes sensor
    /// occupancy and runs collision detection over the final bodies.
    pub fn tick(&mut self) {
        let train_ids: Vec<TrainId> = self.trains.keys().collect();
        for train_id in train_ids {
            self.move_train(train_id);
            self.trains[train_id].accelerate_tick();
        }
        self.update_sensors();
        self.check_collisions();
        self.tick += 1;
    }

    /// Gets the current tick index.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Gets the track grid.
    pub fn grid(&self) -> &TrackGrid {
        &self.grid
    }

    /// Gets the sensor registry.
    pub fn sensors(&self) -> &SensorRegistry {
        &self.sensors
    }

    /// Returns an iterator over all the trains in the simulation.
    pub fn iter_trains(&self) -> impl Iterator<Item = &Train> {
        self.trains.values()
    }

    /// Gets a reference to the train with the given ID.
    pub fn get_train(&self, train_id: TrainId) -> &Train {
        &self.trains[train_id]
    }

    /// Gets the train occupying `coord`, if any.
    pub fn train_at(&self, coord: CellCoord) -> Option<&Train> {
        self.trains.values().find(|train| train.occupies(coord))
    }

    /// Captures an immutable snapshot of the current world state.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }

    /// Attempts a train's single-cell moves for this tick.
    ///
    /// Each failed sub-move crashes the train; once crashed, the
    /// remaining sub-moves are skipped, since no candidate can appear
    /// on a static grid while the head stays put.
    fn move_train(&mut self, train_id: TrainId) {
        for _ in 0..self.trains[train_id].rounded_speed() {
            if self.trains[train_id].status == TrainStatus::Crashed {
                break;
            }
            self.move_train_one_cell(train_id);
        }
    }

    /// Moves a train one cell along the first viable candidate heading,
    /// or crashes it if no candidate is viable.
    ///
    /// Candidates are tried in order: the current heading first, then
    /// each turn from it, keeping only those the head's cell allows.
    /// A candidate is viable if its target cell is in bounds and
    /// traversable.
    fn move_train_one_cell(&mut self, train_id: TrainId) {
        let train = &self.trains[train_id];
        let head = train.head();
        let current_cell = self
            .grid
            .get(head)
            .expect("train head is always on the grid");

        let mut candidates: ArrayVec<Heading, 3> = ArrayVec::new();
        candidates.push(train.heading);
        candidates.extend(train.heading.turns());
        candidates.retain(|heading| current_cell.allows(*heading));

        let target = candidates
            .iter()
            .filter_map(|heading| head.step(*heading))
            .find(|target| self.grid.is_traversable(*target));

        let train = &mut self.trains[train_id];
        match target {
            Some(target) => {
                // The canonical heading comes from the actual
                // displacement, not the candidate that produced it.
                let heading = Heading::from_delta(target.delta_from(head))
                    .expect("single-cell move always has a unit delta");
                train.advance_to(target);
                train.heading = heading;
            }
            None => {
                debug!("train {:?} has no valid move from {:?}", train_id, head);
                self.crash(train_id);
            }
        }
    }

    /// Recomputes sensor occupancy from all train bodies.
    fn update_sensors(&mut self) {
        self.sensors
            .recompute(self.trains.values().flat_map(|train| train.body()));
    }

    /// Crashes every pair of distinct trains sharing a body cell.
    /// A train never collides with itself.
    fn check_collisions(&mut self) {
        let collided: Vec<(TrainId, TrainId)> = self
            .trains
            .keys()
            .tuple_combinations()
            .filter(|(a, b)| {
                let other = &self.trains[*b];
                self.trains[*a].body().any(|coord| other.occupies(coord))
            })
            .collect();

        for (a, b) in collided {
            debug!("trains {:?} and {:?} collided", a, b);
            self.crash(a);
            self.crash(b);
        }
    }

    /// Marks a train as crashed. Idempotent; there is no way back.
    fn crash(&mut self, train_id: TrainId) {
        let train = &mut self.trains[train_id];
        if train.status != TrainStatus::Crashed {
            info!("train {:?} crashed", train_id);
            train.status = TrainStatus::Crashed;
        }
    }
}
