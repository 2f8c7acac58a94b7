use osr_model::{DecodeError, GameMode};
use thiserror::Error;

/// Why a replay could not become the loaded replay.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load replay: {0}")]
    Decode(#[from] DecodeError),

    #[error("This replay is not for osu!mania! Detected mode: {0}")]
    UnsupportedVariant(GameMode),
}

/// Analysis was requested before a valid replay was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please select a valid osu!mania replay file first")]
pub struct NoReplayLoaded;
