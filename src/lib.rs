pub use geometry::Heading;
pub use grid::{Cell, CellCoord, CellType, TrackGrid};
pub use map::{parse_map, MapError};
pub use sensor::SensorRegistry;
pub use simulation::Simulation;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use snapshot::{SnapshotBuffer, TrainSnapshot, WorldSnapshot};
pub use train::{Train, TrainAttributes, TrainStatus};

mod geometry;
mod grid;
mod map;
mod sensor;
mod simulation;
mod snapshot;
mod train;

new_key_type! {
    /// Unique ID of a [Train].
    pub struct TrainId;
}

type TrainSet = SlotMap<TrainId, Train>;
