//! Trains: per-train kinematic and status state.

use crate::grid::CellCoord;
use crate::{Heading, TrainId};
use std::collections::VecDeque;

/// The default speed gained per tick while accelerating, in cells/tick.
pub const DEFAULT_ACCELERATION: f64 = 0.2;

/// The default speed lost per tick while coasting, in cells/tick.
pub const DEFAULT_DECELERATION: f64 = 0.1;

/// The default speed cap, in cells/tick.
pub const DEFAULT_MAX_SPEED: f64 = 5.0;

/// The default number of cells a train body occupies.
pub const DEFAULT_LENGTH: usize = 5;

/// Whether a train is still running or has crashed.
///
/// The transition from `Ok` to `Crashed` is one-way within a
/// simulation run; a crashed train stays in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainStatus {
    Ok,
    Crashed,
}

/// A simulated train.
#[derive(Clone, Debug)]
pub struct Train {
    /// The train's ID.
    pub(crate) id: TrainId,
    /// The current direction of travel.
    pub(crate) heading: Heading,
    /// The current speed in cells per tick, within `[0, max_speed]`.
    speed: f64,
    /// Whether the train is being driven forward this tick.
    pub(crate) accelerating: bool,
    /// Whether the train has crashed.
    pub(crate) status: TrainStatus,
    /// The cells the train occupies, head first; length is fixed.
    pub(crate) body: VecDeque<CellCoord>,
    /// Speed gained per accelerating tick.
    acceleration: f64,
    /// Speed lost per coasting tick.
    deceleration: f64,
    /// The speed cap.
    max_speed: f64,
}

/// The attributes of a simulated train.
#[derive(Clone, Copy)]
pub struct TrainAttributes {
    /// The number of cells the body occupies; must be at least 1.
    pub length: usize,
    /// Speed gained per accelerating tick, in cells/tick.
    pub acceleration: f64,
    /// Speed lost per coasting tick, in cells/tick.
    pub deceleration: f64,
    /// The speed cap, in cells/tick.
    pub max_speed: f64,
}

impl Default for TrainAttributes {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            acceleration: DEFAULT_ACCELERATION,
            deceleration: DEFAULT_DECELERATION,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl Train {
    /// Creates a new train with its body collapsed onto `head`.
    pub(crate) fn new(
        id: TrainId,
        attributes: &TrainAttributes,
        head: CellCoord,
        heading: Heading,
    ) -> Self {
        assert!(attributes.length >= 1, "train length must be at least 1");
        Self {
            id,
            heading,
            speed: 0.0,
            accelerating: false,
            status: TrainStatus::Ok,
            body: std::iter::repeat(head).take(attributes.length).collect(),
            acceleration: attributes.acceleration,
            deceleration: attributes.deceleration,
            max_speed: attributes.max_speed,
        }
    }

    /// Gets the train's ID.
    pub fn id(&self) -> TrainId {
        self.id
    }

    /// The current direction of travel.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// The current speed in cells per tick.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether the train is being driven forward.
    pub fn is_accelerating(&self) -> bool {
        self.accelerating
    }

    /// Whether the train has crashed.
    pub fn status(&self) -> TrainStatus {
        self.status
    }

    /// The number of cells the body occupies.
    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// The coordinate of the head of the train.
    pub fn head(&self) -> CellCoord {
        *self.body.front().expect("train body is never empty")
    }

    /// The cells the train occupies, head first.
    pub fn body(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.body.iter().copied()
    }

    /// Whether any body cell occupies `coord`.
    pub fn occupies(&self, coord: CellCoord) -> bool {
        self.body.contains(&coord)
    }

    /// The whole number of single-cell moves to attempt this tick.
    pub fn rounded_speed(&self) -> usize {
        self.speed.trunc() as usize
    }

    /// Integrates one tick of speed change and clamps into
    /// `[0, max_speed]`.
    pub(crate) fn accelerate_tick(&mut self) {
        if self.accelerating {
            self.speed += self.acceleration;
        } else {
            self.speed -= self.deceleration;
        }
        self.speed = self.speed.clamp(0.0, self.max_speed);
    }

    /// Advances the head to `target`, trimming the tail to keep the
    /// body length fixed.
    pub(crate) fn advance_to(&mut self, target: CellCoord) {
        self.body.push_front(target);
        self.body.pop_back();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use slotmap::Key;

    fn test_train(attributes: &TrainAttributes) -> Train {
        Train::new(
            TrainId::null(),
            attributes,
            CellCoord::new(3, 1),
            Heading::East,
        )
    }

    #[test]
    fn body_starts_collapsed_on_head() {
        let train = test_train(&TrainAttributes::default());
        assert_eq!(train.length(), DEFAULT_LENGTH);
        assert!(train.body().all(|coord| coord == CellCoord::new(3, 1)));
    }

    #[test]
    fn speed_clamps_at_max() {
        let mut train = test_train(&TrainAttributes {
            max_speed: 0.5,
            ..Default::default()
        });
        train.accelerating = true;
        for _ in 0..10 {
            train.accelerate_tick();
        }
        assert_approx_eq!(train.speed(), 0.5);
    }

    #[test]
    fn speed_clamps_at_zero() {
        let mut train = test_train(&TrainAttributes::default());
        train.accelerate_tick();
        assert_approx_eq!(train.speed(), 0.0);
    }

    #[test]
    fn rounded_speed_truncates() {
        let mut train = test_train(&TrainAttributes::default());
        assert_eq!(train.rounded_speed(), 0);
        train.accelerating = true;
        for _ in 0..5 {
            train.accelerate_tick();
        }
        assert_approx_eq!(train.speed(), 1.0);
        assert_eq!(train.rounded_speed(), 1);
    }

    #[test]
    fn advance_preserves_length() {
        let mut train = test_train(&TrainAttributes {
            length: 3,
            ..Default::default()
        });
        train.advance_to(CellCoord::new(4, 1));
        train.advance_to(CellCoord::new(5, 1));
        assert_eq!(train.length(), 3);
        assert_eq!(train.head(), CellCoord::new(5, 1));
        let body: Vec<_> = train.body().collect();
        assert_eq!(
            body,
            vec![
                CellCoord::new(5, 1),
                CellCoord::new(4, 1),
                CellCoord::new(3, 1)
            ]
        );
    }
}
