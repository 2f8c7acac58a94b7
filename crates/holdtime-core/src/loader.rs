use std::path::Path;

use log::{info, warn};
use osr_model::{GameMode, ReplayRecord};

use crate::error::LoadError;

/// The only ruleset whose replays can be analysed.
pub const SUPPORTED_MODE: GameMode = GameMode::Mania;

/// Decodes the replay at `path` and checks it was recorded in osu!mania.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ReplayRecord, LoadError> {
    let path = path.as_ref();
    let replay = ReplayRecord::from_path(path)?;
    validate(replay)
        .inspect(|replay| {
            info!(
                "Loaded replay for {} ({} frames, {} ms) from {}",
                replay.username,
                replay.events.len(),
                replay.duration_ms(),
                path.display()
            )
        })
        .inspect_err(|e| warn!("Rejected {}: {e}", path.display()))
}

/// Rejects replays of any mode other than [`SUPPORTED_MODE`].
pub fn validate(replay: ReplayRecord) -> Result<ReplayRecord, LoadError> {
    if replay.mode != SUPPORTED_MODE {
        return Err(LoadError::UnsupportedVariant(replay.mode));
    }
    Ok(replay)
}
