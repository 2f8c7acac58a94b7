//! Hold-time analysis for osu!mania replays.
//!
//! Loads a replay, rebuilds per-lane press/release edges from the frame
//! timeline and summarises the resulting hold durations.

pub mod analyzer;
pub mod channel;
pub mod chart;
pub mod config;
mod error;
pub mod histogram;
pub mod loader;
pub mod state;
pub mod summary;

pub use analyzer::{HoldPolicy, HoldTimes, LaneHolds, analyze, analyze_with};
pub use channel::{KeyChannel, MANIA_4K_CHANNELS};
pub use chart::render_chart;
pub use config::{AppConfig, ChartConfig};
pub use error::{LoadError, NoReplayLoaded};
pub use histogram::Histogram;
pub use loader::{SUPPORTED_MODE, load};
pub use state::{AppState, LoadedReplay, Report};
pub use summary::{ChannelSummary, summarize};
