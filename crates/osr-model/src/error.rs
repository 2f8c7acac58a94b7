use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a replay file into a [`ReplayRecord`](crate::ReplayRecord).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read replay file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected end of data while reading {field}")]
    UnexpectedEof { field: &'static str },

    #[error("Invalid string marker 0x{marker:02x} in {field}")]
    InvalidString { field: &'static str, marker: u8 },

    #[error("String in {field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("Unknown game mode: {0}")]
    UnknownMode(u8),

    #[error("LZMA error in replay data: {0}")]
    Lzma(String),

    #[error("Invalid replay frame #{index}: {frame:?}")]
    InvalidFrame { index: usize, frame: String },
}
