use std::fmt;

use serde::{Deserialize, Serialize};

use crate::InvalidDirectionError;

/// Axis a move slides along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Axis {
    /// Each of the 4 rows is a line (horizontal moves).
    Row,
    /// Each of the 4 columns is a line (vertical moves).
    Column,
}

/// Slide direction.
///
/// The discriminants are the stable wire indices shared with move selectors
/// and the web API (`Up = 0, Down = 1, Left = 2, Right = 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Wire index of this direction.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Line axis of this direction.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Column,
            Self::Left | Self::Right => Axis::Row,
        }
    }

    /// Whether lines are traversed from the far end (`Down`, `Right`).
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for Direction {
    type Error = InvalidDirectionError;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Up),
            1 => Ok(Self::Down),
            2 => Ok(Self::Left),
            3 => Ok(Self::Right),
            _ => Err(InvalidDirectionError { index }),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirectionError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_and_reversal_mapping() {
        assert_eq!(
            (Direction::Up.axis(), Direction::Up.is_reversed()),
            (Axis::Column, false)
        );
        assert_eq!(
            (Direction::Down.axis(), Direction::Down.is_reversed()),
            (Axis::Column, true)
        );
        assert_eq!(
            (Direction::Left.axis(), Direction::Left.is_reversed()),
            (Axis::Row, false)
        );
        assert_eq!(
            (Direction::Right.axis(), Direction::Right.is_reversed()),
            (Axis::Row, true)
        );
    }

    #[test]
    fn test_index_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::try_from(dir.index()).unwrap(), dir);
        }
        assert_eq!(Direction::ALL.map(Direction::index), [0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_index() {
        for index in [-1, 4, 255, i64::MAX] {
            assert_eq!(
                Direction::try_from(index),
                Err(InvalidDirectionError { index })
            );
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
        let dir: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(dir, Direction::Down);
    }
}
