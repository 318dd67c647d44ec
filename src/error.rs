// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MpxError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("truncated file: block at offset {offset} declares {declared} bytes but only {remaining} remain")]
    TruncatedFile {
        offset: usize,
        declared: usize,
        remaining: usize,
    },

    #[error("malformed block at offset {offset}: {reason}")]
    MalformedBlock { offset: usize, reason: String },

    #[error("data block at offset {offset} references channel {channel} missing from the tally")]
    UnknownChannel { channel: i16, offset: usize },

    #[error("invalid session date/time: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
    InvalidDateTime {
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    },
}

pub type Result<T> = std::result::Result<T, MpxError>;
