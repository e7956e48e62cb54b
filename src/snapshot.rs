//! Immutable tick-boundary snapshots of world state, for readers
//! running concurrently with the simulation loop.

use crate::grid::CellCoord;
use crate::simulation::Simulation;
use crate::train::TrainStatus;
use crate::{Heading, TrainId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The state of one train at a tick boundary.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainSnapshot {
    /// The train's ID.
    pub id: TrainId,
    /// The direction of travel.
    pub heading: Heading,
    /// The speed in cells per tick.
    pub speed: f64,
    /// Whether the train has crashed.
    pub status: TrainStatus,
    /// The cells the train occupies, head first.
    pub body: Vec<CellCoord>,
}

/// A consistent view of the world at one tick boundary.
///
/// Captured after a [`Simulation::tick`] completes, so readers never
/// observe a half-moved train or a stale sensor.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    /// The tick this snapshot was captured at.
    pub tick: u64,
    /// All trains, in the simulation's iteration order.
    pub trains: Vec<TrainSnapshot>,
    /// Occupancy per sensor coordinate.
    pub sensors: HashMap<CellCoord, bool>,
}

impl WorldSnapshot {
    /// Captures the simulation's current state.
    pub(crate) fn capture(sim: &Simulation) -> Self {
        Self {
            tick: sim.tick_count(),
            trains: sim
                .iter_trains()
                .map(|train| TrainSnapshot {
                    id: train.id(),
                    heading: train.heading(),
                    speed: train.speed(),
                    status: train.status(),
                    body: train.body().collect(),
                })
                .collect(),
            sensors: sim.sensors().iter().collect(),
        }
    }

    /// Whether the sensor at `coord` is occupied, or `None` if no
    /// sensor exists there.
    pub fn sensor_occupied(&self, coord: CellCoord) -> Option<bool> {
        self.sensors.get(&coord).copied()
    }

    /// Gets the snapshot of the train with the given ID, if present.
    pub fn train(&self, id: TrainId) -> Option<&TrainSnapshot> {
        self.trains.iter().find(|train| train.id == id)
    }
}

/// A single-writer publish cell for world snapshots.
///
/// The simulation loop publishes after each tick; any number of
/// reader loops take the latest snapshot without ever blocking on
/// simulation cadence.
#[derive(Clone, Default)]
pub struct SnapshotBuffer {
    latest: Arc<Mutex<Arc<WorldSnapshot>>>,
}

impl SnapshotBuffer {
    /// Creates a buffer holding an empty snapshot.
    pub fn new() -> Self {
        Default::default()
    }

    /// Publishes a new snapshot, replacing the previous one.
    pub fn publish(&self, snapshot: WorldSnapshot) {
        let snapshot = Arc::new(snapshot);
        *self.latest.lock().expect("snapshot lock poisoned") = snapshot;
    }

    /// Gets the most recently published snapshot.
    pub fn latest(&self) -> Arc<WorldSnapshot> {
        self.latest.lock().expect("snapshot lock poisoned").clone()
    }
}
