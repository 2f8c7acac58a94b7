// osu! replay (.osr) data model: binary decoder, game modes, input frames

mod error;
mod frame;
mod mode;
mod reader;
mod replay;

pub use error::DecodeError;
pub use frame::{FrameData, InputEvent, RNG_SEED_MARKER, format_frames, parse_frames};
pub use mode::GameMode;
pub use replay::{JudgementCounts, REPLAY_EXTENSION, ReplayRecord};
