use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::reader::{ByteReader, write_string};
use crate::{DecodeError, FrameData, GameMode, InputEvent, format_frames, parse_frames};

/// File extension used by osu! replays.
pub const REPLAY_EXTENSION: &str = "osr";

/// .NET ticks at 1970-01-01T00:00:00Z.
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;
const TICKS_PER_SECOND: i64 = 10_000_000;

/// Hit judgement counters stored in the replay header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgementCounts {
    pub count_300: u16,
    pub count_100: u16,
    pub count_50: u16,
    /// MAX (300g) in mania.
    pub geki: u16,
    /// 200 in mania.
    pub katu: u16,
    pub miss: u16,
}

/// A fully decoded replay. Read-only once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub mode: GameMode,
    /// Game client version (yyyymmdd).
    pub version: i32,
    /// MD5 of the beatmap file.
    pub beatmap_hash: String,
    pub username: String,
    /// MD5 of the replay itself.
    pub replay_hash: String,
    pub judgements: JudgementCounts,
    pub score: i32,
    pub max_combo: u16,
    pub perfect: bool,
    /// Mod bitflags.
    pub mods: u32,
    /// Raw `time/life|...` life bar string.
    #[serde(default)]
    pub life_bar: String,
    pub timestamp: DateTime<Utc>,
    pub events: Vec<InputEvent>,
    /// Seed stored in the trailing `-12345` frame, kept out of `events`.
    #[serde(default)]
    pub rng_seed: Option<i64>,
    /// Missing on replays that were never submitted by old clients.
    pub online_score_id: Option<i64>,
}

impl Default for ReplayRecord {
    fn default() -> Self {
        Self {
            mode: GameMode::Mania,
            version: 0,
            beatmap_hash: String::new(),
            username: String::new(),
            replay_hash: String::new(),
            judgements: JudgementCounts::default(),
            score: 0,
            max_combo: 0,
            perfect: false,
            mods: 0,
            life_bar: String::new(),
            timestamp: DateTime::default(),
            events: Vec::new(),
            rng_seed: None,
            online_score_id: None,
        }
    }
}

impl ReplayRecord {
    /// Reads and decodes the replay at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| DecodeError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(&data)
    }

    /// Decodes a complete .osr file held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(data);

        let mode = GameMode::from_u8(reader.read_u8("mode")?)?;
        let version = reader.read_i32("version")?;
        let beatmap_hash = reader.read_string("beatmap hash")?;
        let username = reader.read_string("player name")?;
        let replay_hash = reader.read_string("replay hash")?;
        let judgements = JudgementCounts {
            count_300: reader.read_u16("300 count")?,
            count_100: reader.read_u16("100 count")?,
            count_50: reader.read_u16("50 count")?,
            geki: reader.read_u16("geki count")?,
            katu: reader.read_u16("katu count")?,
            miss: reader.read_u16("miss count")?,
        };
        let score = reader.read_i32("score")?;
        let max_combo = reader.read_u16("max combo")?;
        let perfect = reader.read_u8("perfect flag")? != 0;
        let mods = reader.read_i32("mods")? as u32;
        let life_bar = reader.read_string("life bar")?;
        let timestamp = ticks_to_datetime(reader.read_i64("timestamp")?);

        let compressed_len = reader.read_i32("replay data length")?;
        let FrameData { events, rng_seed } = if compressed_len > 0 {
            let compressed = reader.read_bytes(compressed_len as usize, "replay data")?;
            parse_frames(&decompress(compressed)?)?
        } else {
            FrameData::default()
        };

        let online_score_id = match reader.remaining() {
            n if n >= 8 => Some(reader.read_i64("online score id")?),
            n if n >= 4 => Some(i64::from(reader.read_i32("online score id")?)),
            _ => None,
        };

        debug!(
            "Decoded {} replay v{} by {:?}: {} frames",
            mode,
            version,
            username,
            events.len()
        );

        Ok(Self {
            mode,
            version,
            beatmap_hash,
            username,
            replay_hash,
            judgements,
            score,
            max_combo,
            perfect,
            mods,
            life_bar,
            timestamp,
            events,
            rng_seed,
            online_score_id,
        })
    }

    /// Encodes the record back into the .osr layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        out.push(self.mode.as_u8());
        out.extend_from_slice(&self.version.to_le_bytes());
        write_string(&mut out, &self.beatmap_hash);
        write_string(&mut out, &self.username);
        write_string(&mut out, &self.replay_hash);
        for count in [
            self.judgements.count_300,
            self.judgements.count_100,
            self.judgements.count_50,
            self.judgements.geki,
            self.judgements.katu,
            self.judgements.miss,
        ] {
            out.extend_from_slice(&count.to_le_bytes());
        }
        out.extend_from_slice(&self.score.to_le_bytes());
        out.extend_from_slice(&self.max_combo.to_le_bytes());
        out.push(u8::from(self.perfect));
        out.extend_from_slice(&(self.mods as i32).to_le_bytes());
        write_string(&mut out, &self.life_bar);
        out.extend_from_slice(&datetime_to_ticks(&self.timestamp).to_le_bytes());

        let compressed = if self.events.is_empty() && self.rng_seed.is_none() {
            Vec::new()
        } else {
            compress(&format_frames(&self.events, self.rng_seed))?
        };
        let compressed_len = i32::try_from(compressed.len())
            .map_err(|_| DecodeError::Lzma("replay data too large".to_string()))?;
        out.extend_from_slice(&compressed_len.to_le_bytes());
        out.extend_from_slice(&compressed);

        if let Some(id) = self.online_score_id {
            out.extend_from_slice(&id.to_le_bytes());
        }
        Ok(out)
    }

    /// Total time covered by the frames, summing every delta.
    pub fn duration_ms(&self) -> i64 {
        self.events.iter().map(|e| e.time_delta).sum()
    }
}

fn decompress(compressed: &[u8]) -> Result<String, DecodeError> {
    let mut input = compressed;
    let mut raw = Vec::new();
    lzma_rs::lzma_decompress(&mut input, &mut raw)
        .map_err(|e| DecodeError::Lzma(e.to_string()))?;
    String::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8 {
        field: "replay data",
    })
}

fn compress(text: &str) -> Result<Vec<u8>, DecodeError> {
    let mut input = text.as_bytes();
    let mut out = Vec::new();
    lzma_rs::lzma_compress(&mut input, &mut out)
        .map_err(|e| DecodeError::Lzma(e.to_string()))?;
    Ok(out)
}

fn ticks_to_datetime(ticks: i64) -> DateTime<Utc> {
    let unix_ticks = ticks.saturating_sub(UNIX_EPOCH_TICKS);
    let secs = unix_ticks.div_euclid(TICKS_PER_SECOND);
    let nanos = (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos).unwrap_or_default()
}

fn datetime_to_ticks(timestamp: &DateTime<Utc>) -> i64 {
    timestamp.timestamp() * TICKS_PER_SECOND
        + i64::from(timestamp.timestamp_subsec_nanos() / 100)
        + UNIX_EPOCH_TICKS
}
