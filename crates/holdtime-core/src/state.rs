//! Application state: the currently loaded replay and the actions on it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{ImageFormat, RgbaImage};
use log::{info, warn};
use osr_model::ReplayRecord;
use serde::Serialize;

use crate::analyzer::{HoldTimes, analyze_with};
use crate::channel::MANIA_4K_CHANNELS;
use crate::chart::render_chart;
use crate::config::{AppConfig, ChartConfig};
use crate::error::{LoadError, NoReplayLoaded};
use crate::loader;
use crate::summary::{ChannelSummary, summarize};

/// A validated replay together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedReplay {
    pub path: PathBuf,
    pub replay: ReplayRecord,
}

/// Holds at most one loaded replay. `load` and `clear` are the only mutators.
#[derive(Debug, Default)]
pub struct AppState {
    loaded: Option<LoadedReplay>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(&self) -> Option<&LoadedReplay> {
        self.loaded.as_ref()
    }

    /// Loads `path`, replacing the current replay on success.
    ///
    /// A decode failure keeps the previous replay. A replay from another game
    /// mode clears the slot.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<&LoadedReplay, LoadError> {
        let path = path.as_ref();
        match loader::load(path) {
            Ok(replay) => {
                let loaded = self.loaded.insert(LoadedReplay {
                    path: path.to_path_buf(),
                    replay,
                });
                Ok(&*loaded)
            }
            Err(e @ LoadError::UnsupportedVariant(_)) => {
                self.clear();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.loaded.take() {
            info!("Cleared replay {}", previous.path.display());
        }
    }

    /// Analyses the loaded replay. Nothing is computed without one.
    pub fn generate(&self, config: &AppConfig) -> Result<Report, NoReplayLoaded> {
        let Some(loaded) = &self.loaded else {
            warn!("Generate requested with no replay loaded");
            return Err(NoReplayLoaded);
        };
        Ok(Report::new(&loaded.replay, config))
    }
}

/// Result of one analysis: per-lane holds and their summaries.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub hold_times: HoldTimes,
    pub summaries: Vec<ChannelSummary>,
}

impl Report {
    pub fn new(replay: &ReplayRecord, config: &AppConfig) -> Self {
        let hold_times = analyze_with(&replay.events, &MANIA_4K_CHANNELS, config.analysis);
        let summaries = summarize(&hold_times);
        Self {
            title: chart_title(replay),
            hold_times,
            summaries,
        }
    }

    pub fn render(&self, chart: &ChartConfig) -> RgbaImage {
        render_chart(&self.summaries, chart)
    }

    /// Renders the chart and writes it as a PNG, creating parent directories.
    pub fn save_png(&self, path: &Path, chart: &ChartConfig) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.render(chart)
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        info!("Wrote chart to {}", path.display());
        Ok(())
    }

    /// Plain-text summary table, one row per lane with holds.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(
            out,
            "{:<8}{:>8}{:>12}{:>12}{:>8}{:>8}",
            "Lane", "Holds", "Mean (ms)", "Median", "Min", "Max"
        );
        for s in &self.summaries {
            let _ = writeln!(
                out,
                "{:<8}{:>8}{:>12.2}{:>12.1}{:>8}{:>8}",
                s.label, s.count, s.mean, s.median, s.min, s.max
            );
        }
        if self.summaries.is_empty() {
            let _ = writeln!(out, "(no holds recorded)");
        }
        out
    }
}

/// `(<beatmap hash>) <player> at <dd/mm/YYYY HH:MM:SS> + (<score>ms)`
pub fn chart_title(replay: &ReplayRecord) -> String {
    format!(
        "({}) {} at {} + ({}ms)",
        replay.beatmap_hash,
        replay.username,
        replay.timestamp.format("%d/%m/%Y %H:%M:%S"),
        replay.score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use osr_model::{GameMode, InputEvent};

    fn replay() -> ReplayRecord {
        ReplayRecord {
            username: "Xenon".to_string(),
            beatmap_hash: "abc123".to_string(),
            score: 777_000,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            events: vec![
                InputEvent::new(0, 0b0001),
                InputEvent::new(50, 0),
                InputEvent::new(10, 0b10_0000),
                InputEvent::new(90, 0),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_without_replay() {
        let state = AppState::new();
        assert!(state.loaded().is_none());
        assert_eq!(state.generate(&AppConfig::default()).unwrap_err(), NoReplayLoaded);
        // Repeatable without side effects.
        assert_eq!(state.generate(&AppConfig::default()).unwrap_err(), NoReplayLoaded);
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(
            chart_title(&replay()),
            "(abc123) Xenon at 02/01/2024 03:04:05 + (777000ms)"
        );
    }

    #[test]
    fn test_report_from_replay() {
        let report = Report::new(&replay(), &AppConfig::default());
        assert_eq!(report.hold_times.get("Key 1"), Some(&[50][..]));
        assert_eq!(report.hold_times.get("Key 4"), Some(&[90][..]));
        let labels: Vec<_> = report.summaries.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Key 1", "Key 4"]);
    }

    #[test]
    fn test_table_lists_lanes_with_holds() {
        let table = Report::new(&replay(), &AppConfig::default()).to_table();
        assert!(table.starts_with("(abc123) Xenon"));
        assert!(table.contains("Key 1"));
        assert!(table.contains("50.00"));
        assert!(!table.contains("Key 2"));
    }

    #[test]
    fn test_table_without_holds() {
        let empty = ReplayRecord {
            mode: GameMode::Mania,
            ..Default::default()
        };
        let table = Report::new(&empty, &AppConfig::default()).to_table();
        assert!(table.contains("(no holds recorded)"));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts").join("holds.png");
        let config = AppConfig::default();
        Report::new(&replay(), &config)
            .save_png(&path, &config.chart)
            .unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (800, 400));
    }

    #[test]
    fn test_render_uses_chart_size() {
        let config = AppConfig::default();
        let image = Report::new(&replay(), &config).render(&config.chart);
        assert_eq!(image.dimensions(), (800, 400));
    }
}
