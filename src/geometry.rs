//! Direction geometry: headings, coordinate deltas and turn tables.

/// A discrete direction of travel on the grid.
///
/// The vertical axis grows downward, so [`Heading::North`] has a
/// negative y delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// All headings, in a fixed order.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// The coordinate delta of one cell of travel along this heading.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }

    /// The heading whose [`delta`](Self::delta) equals the given delta.
    ///
    /// Only the four unit deltas are defined; anything else is a
    /// programming error on the caller's part and yields `None`.
    pub fn from_delta(delta: (i32, i32)) -> Option<Heading> {
        match delta {
            (0, -1) => Some(Heading::North),
            (1, 0) => Some(Heading::East),
            (0, 1) => Some(Heading::South),
            (-1, 0) => Some(Heading::West),
            _ => None,
        }
    }

    /// The headings reachable by turning from this one,
    /// left turn first, then right turn.
    pub fn turns(self) -> [Heading; 2] {
        [self.turn_left(), self.turn_right()]
    }

    /// The heading after a 90-degree left turn (y-down axes).
    pub fn turn_left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// The heading after a 90-degree right turn (y-down axes).
    pub fn turn_right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }
}
