//! Parsing of text map descriptions into a [`TrackGrid`].
//!
//! A map is a newline-separated character grid:
//!
//! | char         | cell                                |
//! |--------------|-------------------------------------|
//! | `.` or space | empty                               |
//! | `-`          | track, east/west                    |
//! | `\|`         | track, north/south                  |
//! | `+`          | track, all four headings            |
//! | `<`          | left switch, all four headings      |
//! | `>`          | right switch, all four headings     |
//! | `s`          | sensor, east/west                   |
//! | `S`          | sensor, all four headings           |

use crate::geometry::Heading;
use crate::grid::{Cell, CellType, TrackGrid};
use thiserror::Error;

/// An error encountered while parsing a map description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown map character {ch:?} at column {col}, row {row}")]
    UnknownChar { ch: char, col: usize, row: usize },
}

const EAST_WEST: [Heading; 2] = [Heading::East, Heading::West];
const NORTH_SOUTH: [Heading; 2] = [Heading::North, Heading::South];

/// Parses a map description into a track grid.
pub fn parse_map(text: &str) -> Result<TrackGrid, MapError> {
    // Only the trailing newline is insignificant; a row of spaces is
    // a valid row of empty cells.
    let rows: Vec<&str> = text.trim_end_matches('\n').lines().collect();
    let height = rows.len();
    if height == 0 {
        return Err(MapError::Empty);
    }
    let width = rows[0].chars().count();

    let mut cells = Vec::with_capacity(width * height);
    for (y, row) in rows.iter().enumerate() {
        let row_width = row.chars().count();
        if row_width != width {
            return Err(MapError::RaggedRow {
                row: y,
                expected: width,
                found: row_width,
            });
        }
        for (x, ch) in row.chars().enumerate() {
            cells.push(parse_cell(ch).ok_or(MapError::UnknownChar { ch, col: x, row: y })?);
        }
    }

    Ok(TrackGrid::new(width, height, cells))
}

/// Maps one character to its cell, or `None` if unrecognized.
fn parse_cell(ch: char) -> Option<Cell> {
    let cell = match ch {
        '.' | ' ' => Cell::empty(),
        '-' => Cell::new(CellType::Track, EAST_WEST),
        '|' => Cell::new(CellType::Track, NORTH_SOUTH),
        '+' => Cell::new(CellType::Track, Heading::ALL),
        '<' => Cell::new(CellType::SwitchLeft, Heading::ALL),
        '>' => Cell::new(CellType::SwitchRight, Heading::ALL),
        's' => Cell::new(CellType::Sensor, EAST_WEST),
        'S' => Cell::new(CellType::Sensor, Heading::ALL),
        _ => return None,
    };
    Some(cell)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::CellCoord;

    #[test]
    fn parses_a_small_loop() {
        let grid = parse_map(concat!("+--+\n", "|..|\n", "+-s+\n")).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(
            grid.get(CellCoord::new(1, 0)).unwrap().cell_type(),
            CellType::Track
        );
        assert_eq!(
            grid.get(CellCoord::new(1, 1)).unwrap().cell_type(),
            CellType::Empty
        );
        assert_eq!(
            grid.get(CellCoord::new(2, 2)).unwrap().cell_type(),
            CellType::Sensor
        );
    }

    #[test]
    fn horizontal_track_allows_both_directions() {
        let grid = parse_map("---").unwrap();
        let cell = grid.get(CellCoord::new(1, 0)).unwrap();
        assert!(cell.allows(Heading::East));
        assert!(cell.allows(Heading::West));
        assert!(!cell.allows(Heading::North));
    }

    #[test]
    fn keeps_rows_of_spaces() {
        let grid = parse_map("---\n   \n---").unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(
            grid.get(CellCoord::new(1, 1)).unwrap().cell_type(),
            CellType::Empty
        );
        assert_eq!(
            grid.get(CellCoord::new(1, 2)).unwrap().cell_type(),
            CellType::Track
        );
    }

    #[test]
    fn rejects_wrong_width_blank_row() {
        assert_eq!(
            parse_map("---\n  \n---"),
            Err(MapError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_empty_map() {
        assert_eq!(parse_map(""), Err(MapError::Empty));
        assert_eq!(parse_map("\n\n"), Err(MapError::Empty));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            parse_map("---\n--"),
            Err(MapError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            parse_map("-x-"),
            Err(MapError::UnknownChar {
                ch: 'x',
                col: 1,
                row: 0
            })
        );
    }
}
