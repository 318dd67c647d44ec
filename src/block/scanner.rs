// src/block/scanner.rs
use crate::block::{Block, BlockTag};
use crate::error::{MpxError, Result};
use crate::utils::u16_at;
use log::trace;

/// Forward-only cursor over the raw capture buffer.
///
/// Each block starts with a little-endian u16 length (which counts the
/// length and tag bytes themselves) followed by a one-byte tag; the cursor
/// advances by exactly the declared length per step. Scanning stops once
/// fewer than [`BlockScanner::MIN_REMAINING`] bytes remain, leaving an
/// unparsed trailing remainder.
///
/// A declared length of zero is rejected rather than looping forever, and a
/// length overrunning the buffer aborts the scan with offset context.
pub struct BlockScanner<'a> {
    capture: &'a [u8],
    cursor: usize,
}

impl<'a> BlockScanner<'a> {
    /// A block needs at least a length prefix, a tag byte, and the 2-byte
    /// channel/payload field every typed block carries before its payload.
    pub const MIN_REMAINING: usize = 5;

    pub fn new(capture: &'a [u8]) -> Self {
        BlockScanner { capture, cursor: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl<'a> Iterator for BlockScanner<'a> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.capture.len().saturating_sub(self.cursor);
        if remaining < Self::MIN_REMAINING {
            return None;
        }

        let offset = self.cursor;
        // remaining >= 5, so the length and tag reads cannot fail.
        let length = u16_at(self.capture, offset).unwrap_or(0) as usize;
        if length == 0 {
            // Poison the cursor so a caller that ignores the error cannot spin.
            self.cursor = self.capture.len();
            return Some(Err(MpxError::MalformedBlock {
                offset,
                reason: "zero-length block".to_string(),
            }));
        }
        if length > remaining {
            self.cursor = self.capture.len();
            return Some(Err(MpxError::TruncatedFile {
                offset,
                declared: length,
                remaining,
            }));
        }

        let tag = BlockTag::from_byte(self.capture[offset + 2]);
        trace!("block at {offset}: {length} bytes, tag {tag:?}");
        self.cursor = offset + length;

        Some(Ok(Block {
            offset,
            length,
            tag,
        }))
    }
}
