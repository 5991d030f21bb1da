use crate::activity::Breakdown;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_LEVEL: u8 = 4;

/// Ordinal activity bucket, always within `0..=4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const NONE: Level = Level(0);
    pub const MAX: Level = Level(MAX_LEVEL);

    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_LEVEL))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for Level {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<u64> for Level {
    fn from(value: u64) -> Self {
        Self::new(value.min(u64::from(MAX_LEVEL)) as u8)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelerError {
    #[error("level bounds must start at 1 or more, got {0}")]
    ZeroBound(u64),
    #[error("level bounds must be strictly ascending, got {0:?}")]
    NotAscending([u64; 3]),
}

/// Fixed cut points over the daily count.
///
/// `upper_bounds[i]` is the largest count that still maps to level `i + 1`;
/// anything above the last bound is level 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Leveler {
    upper_bounds: [u64; 3],
}

impl Default for Leveler {
    fn default() -> Self {
        Self {
            upper_bounds: [2, 5, 9],
        }
    }
}

impl Leveler {
    pub fn new(upper_bounds: [u64; 3]) -> Result<Self, LevelerError> {
        if upper_bounds[0] == 0 {
            return Err(LevelerError::ZeroBound(upper_bounds[0]));
        }
        if upper_bounds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(LevelerError::NotAscending(upper_bounds));
        }
        Ok(Self { upper_bounds })
    }

    pub fn classify_count(&self, count: u64) -> Level {
        if count == 0 {
            return Level::NONE;
        }
        let bucket = self
            .upper_bounds
            .iter()
            .position(|bound| count <= *bound)
            .unwrap_or(self.upper_bounds.len());
        Level::new(bucket as u8 + 1)
    }

    /// Zero days stay at level 0. Otherwise a breakdown that outweighs the
    /// reported total decides the bucket.
    pub fn classify(&self, count: u64, breakdown: &Breakdown) -> Level {
        if count == 0 {
            return Level::NONE;
        }
        self.classify_count(count.max(breakdown.total()))
    }
}
