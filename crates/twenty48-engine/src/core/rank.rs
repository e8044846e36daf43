use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{InvalidRankError, InvalidValueError};

/// Tile rank: the base-2 exponent of the displayed tile value.
///
/// Rank 0 denotes an empty cell; rank `r >= 1` denotes a tile showing `2^r`.
/// Ranks are the canonical representation everywhere inside the engine. The
/// displayed value only appears at the boundary through [`Rank::value`] and
/// [`Rank::from_value`].
///
/// # Example
///
/// ```
/// use twenty48_engine::Rank;
///
/// let rank = Rank::new(11).unwrap();
/// assert_eq!(rank.value(), 2048);
/// assert_eq!(Rank::from_value(2048).unwrap(), rank);
/// assert_eq!(Rank::EMPTY.value(), 0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    /// The empty cell.
    pub const EMPTY: Self = Self(0);
    /// Smallest tile rank (displayed value 2).
    pub const MIN_TILE: Self = Self(1);
    /// Largest representable rank (displayed value 2^31).
    pub const MAX: Self = Self(31);

    /// Creates a rank, rejecting anything above [`Rank::MAX`].
    pub const fn new(rank: u8) -> Result<Self, InvalidRankError> {
        if rank > Self::MAX.0 {
            return Err(InvalidRankError {
                rank: rank as u32,
            });
        }
        Ok(Self(rank))
    }

    /// Creates a rank, clamping anything above [`Rank::MAX`].
    #[must_use]
    pub const fn saturating_new(rank: u8) -> Self {
        if rank > Self::MAX.0 {
            Self::MAX
        } else {
            Self(rank)
        }
    }

    /// Like [`Rank::new`], but accepts any integer width (front-end input).
    pub fn try_from_u32(rank: u32) -> Result<Self, InvalidRankError> {
        u8::try_from(rank)
            .ok()
            .and_then(|r| Self::new(r).ok())
            .ok_or(InvalidRankError { rank })
    }

    /// Converts a displayed tile value back to its rank.
    ///
    /// `0` maps to the empty rank; every other value must be a power of two
    /// between 2 and 2^31.
    pub fn from_value(value: u64) -> Result<Self, InvalidValueError> {
        if value == 0 {
            return Ok(Self::EMPTY);
        }
        if !value.is_power_of_two() || value == 1 {
            return Err(InvalidValueError { value });
        }
        u8::try_from(value.trailing_zeros())
            .ok()
            .and_then(|r| Self::new(r).ok())
            .ok_or(InvalidValueError { value })
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Displayed tile value (`2^rank`, or `0` for the empty rank).
    #[must_use]
    pub const fn value(self) -> u64 {
        if self.0 == 0 { 0 } else { 1 << self.0 }
    }

    /// The rank one step above, or `None` at [`Rank::MAX`].
    #[must_use]
    pub const fn succ(self) -> Option<Self> {
        if self.0 >= Self::MAX.0 {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    /// The rank one step below; a rank-1 tile steps down to empty.
    #[must_use]
    pub const fn pred(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl TryFrom<u8> for Rank {
    type Error = InvalidRankError;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Self::new(rank)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rank = u8::deserialize(deserializer)?;
        Self::new(rank).map_err(serde::de::Error::custom)
    }
}
