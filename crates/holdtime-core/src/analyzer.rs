//! Hold-time reconstruction from replay frames.
//!
//! A single forward pass keeps a running clock and, per lane, the time of the
//! pending press. A rising edge stores the press time; a falling edge emits the
//! elapsed time and clears the press.

use log::debug;
use osr_model::InputEvent;
use serde::{Deserialize, Serialize};

use crate::channel::KeyChannel;

/// Edge-case policy for durations that the default analysis discards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldPolicy {
    /// Keep holds whose press and release fall on the same instant.
    pub keep_zero_length: bool,
    /// Close holds still pending after the last frame at the final clock value.
    pub close_at_end: bool,
}

impl HoldPolicy {
    fn accepts(self, duration: i64) -> bool {
        duration > 0 || (self.keep_zero_length && duration == 0)
    }
}

/// Hold durations of one lane, in order of release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneHolds {
    pub channel: KeyChannel,
    pub durations: Vec<i64>,
}

impl LaneHolds {
    fn record(&mut self, duration: i64, policy: HoldPolicy) {
        if policy.accepts(duration) {
            self.durations.push(duration);
        }
    }
}

/// Per-lane hold durations in channel-table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HoldTimes {
    lanes: Vec<LaneHolds>,
}

impl HoldTimes {
    pub fn lanes(&self) -> &[LaneHolds] {
        &self.lanes
    }

    pub fn iter(&self) -> impl Iterator<Item = &LaneHolds> {
        self.lanes.iter()
    }

    /// Durations recorded for the lane with this label.
    pub fn get(&self, label: &str) -> Option<&[i64]> {
        self.lanes
            .iter()
            .find(|lane| lane.channel.label == label)
            .map(|lane| lane.durations.as_slice())
    }

    /// Number of holds across all lanes.
    pub fn total(&self) -> usize {
        self.lanes.iter().map(|lane| lane.durations.len()).sum()
    }
}

/// Pending-press slot of a single lane.
#[derive(Debug, Clone, Copy, Default)]
struct LaneState {
    press_start: Option<i64>,
}

impl LaneState {
    fn on_press(&mut self, time: i64) {
        if self.press_start.is_none() {
            self.press_start = Some(time);
        }
    }

    /// Clears the pending press and returns its elapsed time, if any.
    fn on_release(&mut self, time: i64) -> Option<i64> {
        self.press_start
            .take()
            .map(|start| time.saturating_sub(start))
    }
}

/// Rebuilds hold durations with the default policy: zero-length holds and
/// holds still pending at the end of the recording are dropped.
pub fn analyze(events: &[InputEvent], channels: &[KeyChannel]) -> HoldTimes {
    analyze_with(events, channels, HoldPolicy::default())
}

/// Rebuilds hold durations for each channel.
///
/// The clock is the running sum of `time_delta` and is never clamped, so marker
/// frames with negative deltas may move it backwards; a release observed before
/// its press on that clock yields a negative duration and is discarded.
pub fn analyze_with(
    events: &[InputEvent],
    channels: &[KeyChannel],
    policy: HoldPolicy,
) -> HoldTimes {
    let mut clock: i64 = 0;
    let mut states = vec![LaneState::default(); channels.len()];
    let mut lanes: Vec<LaneHolds> = channels
        .iter()
        .map(|&channel| LaneHolds {
            channel,
            durations: Vec::new(),
        })
        .collect();

    for event in events {
        clock = clock.saturating_add(event.time_delta);

        for ((channel, state), lane) in channels.iter().zip(&mut states).zip(&mut lanes) {
            if channel.is_held(event.keys) {
                state.on_press(clock);
            } else if let Some(duration) = state.on_release(clock) {
                lane.record(duration, policy);
            }
        }
    }

    if policy.close_at_end {
        for (state, lane) in states.iter_mut().zip(&mut lanes) {
            if let Some(duration) = state.on_release(clock) {
                lane.record(duration, policy);
            }
        }
    }

    let hold_times = HoldTimes { lanes };
    debug!(
        "Analyzed {} frames over {} lanes: {} holds",
        events.len(),
        channels.len(),
        hold_times.total()
    );
    hold_times
}
