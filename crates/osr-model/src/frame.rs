use serde::{Deserialize, Serialize};

use crate::DecodeError;

/// One frame of the replay timeline.
///
/// For osu!mania the frame's `x` coordinate carries the bitmask of held
/// columns, which is all this model keeps besides the time delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Milliseconds since the previous frame. May be zero or negative
    /// (osu! writes a leading `-1` frame).
    pub time_delta: i64,
    /// Bitmask of currently held keys.
    pub keys: u32,
}

impl InputEvent {
    pub fn new(time_delta: i64, keys: u32) -> Self {
        Self { time_delta, keys }
    }
}

/// Time delta of the trailing frame osu! uses to store the RNG seed in `z`.
pub const RNG_SEED_MARKER: i64 = -12345;

/// Decoded frame payload: the input timeline and the seed from its marker frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameData {
    pub events: Vec<InputEvent>,
    pub rng_seed: Option<i64>,
}

/// Parses the decompressed `w|x|y|z,` frame text.
///
/// A final frame with `w == -12345` is not input; it is removed from the
/// timeline and its `z` is returned as the RNG seed.
pub fn parse_frames(text: &str) -> Result<FrameData, DecodeError> {
    let mut events = Vec::new();
    let mut last_z = 0;
    for (index, frame) in text.split(',').enumerate() {
        let frame = frame.trim();
        if frame.is_empty() {
            continue;
        }
        let invalid = || DecodeError::InvalidFrame {
            index,
            frame: frame.to_string(),
        };

        let fields: Vec<&str> = frame.split('|').collect();
        if fields.len() < 4 {
            return Err(invalid());
        }
        let time_delta = parse_integer(fields[0]).ok_or_else(invalid)?;
        let x: f64 = fields[1].parse().map_err(|_| invalid())?;
        // y is unused by mania but must still be numeric.
        fields[2].parse::<f64>().map_err(|_| invalid())?;
        last_z = parse_integer(fields[3]).ok_or_else(invalid)?;

        // Saturating float cast: negative or NaN coordinates hold no keys.
        events.push(InputEvent::new(time_delta, x as u32));
    }

    let rng_seed = if events
        .last()
        .is_some_and(|last| last.time_delta == RNG_SEED_MARKER)
    {
        events.pop();
        Some(last_z)
    } else {
        None
    };
    Ok(FrameData { events, rng_seed })
}

fn parse_integer(field: &str) -> Option<i64> {
    field
        .parse::<i64>()
        .ok()
        .or_else(|| field.parse::<f64>().ok().map(|v| v as i64))
}

/// Inverse of [`parse_frames`]; y and z are written as zero except for the
/// seed frame, which is appended last when `rng_seed` is set.
pub fn format_frames(events: &[InputEvent], rng_seed: Option<i64>) -> String {
    let mut out = String::with_capacity((events.len() + 1) * 12);
    for event in events {
        out.push_str(&format!("{}|{}|0|0,", event.time_delta, event.keys));
    }
    if let Some(seed) = rng_seed {
        out.push_str(&format!("{RNG_SEED_MARKER}|0|0|{seed},"));
    }
    out
}
