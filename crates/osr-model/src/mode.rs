use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DecodeError;

/// Ruleset a replay was recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Standard,
    Taiko,
    Catch,
    Mania,
}

impl GameMode {
    /// Mode byte as stored at the start of an .osr file.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Standard => 0,
            Self::Taiko => 1,
            Self::Catch => 2,
            Self::Mania => 3,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(Self::Standard),
            1 => Ok(Self::Taiko),
            2 => Ok(Self::Catch),
            3 => Ok(Self::Mania),
            other => Err(DecodeError::UnknownMode(other)),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "osu!"),
            Self::Taiko => write!(f, "osu!taiko"),
            Self::Catch => write!(f, "osu!catch"),
            Self::Mania => write!(f, "osu!mania"),
        }
    }
}
