use serde::Serialize;

use crate::analyzer::{HoldTimes, LaneHolds};

/// Statistics of one lane that recorded at least one hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub label: String,
    pub mask: u32,
    pub durations: Vec<i64>,
    pub count: usize,
    /// Arithmetic mean in milliseconds.
    pub mean: f64,
    pub median: f64,
    pub min: i64,
    pub max: i64,
}

impl ChannelSummary {
    /// Returns `None` for a lane without holds.
    pub fn from_lane(lane: &LaneHolds) -> Option<Self> {
        let durations = &lane.durations;
        let min = *durations.iter().min()?;
        let max = *durations.iter().max()?;
        let count = durations.len();
        let mean = durations.iter().map(|&d| d as f64).sum::<f64>() / count as f64;

        let mut sorted = durations.clone();
        sorted.sort_unstable();
        let median = if count % 2 == 1 {
            sorted[count / 2] as f64
        } else {
            (sorted[count / 2 - 1] as f64 + sorted[count / 2] as f64) / 2.0
        };

        Some(Self {
            label: lane.channel.label.to_string(),
            mask: lane.channel.mask,
            durations: durations.clone(),
            count,
            mean,
            median,
            min,
            max,
        })
    }

    /// Legend entry, e.g. `Key 1 (120 holds, 84.25ms avg.)`.
    pub fn legend_label(&self) -> String {
        format!(
            "{} ({} holds, {:.2}ms avg.)",
            self.label, self.count, self.mean
        )
    }
}

/// Summaries for every lane with at least one hold, in lane order.
/// Lanes without holds are left out entirely.
pub fn summarize(hold_times: &HoldTimes) -> Vec<ChannelSummary> {
    hold_times
        .iter()
        .filter_map(ChannelSummary::from_lane)
        .collect()
}
