// src/stream/mod.rs
use crate::commands::{CommandParserRegistry, StreamRecord};
use crate::error::{MpxError, Result};
use crate::utils::{decode_padded_str, i16_at};
use log::debug;

/// An ordered sequence of decoded command/status records sharing one
/// acquisition-channel context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedStream {
    pub channel_name: String,
    pub channel: i16,
    pub records: Vec<StreamRecord>,
}

impl NamedStream {
    /// The context events attach to before any StreamName block is seen.
    pub fn unnamed() -> Self {
        NamedStream::default()
    }
}

/// Tracks the current named stream and broadcasts event blocks to the
/// parser registry.
///
/// A StreamName block replaces the current stream wholesale; prior context
/// is neither merged nor restored. Event dispatch is strictly sequential in
/// file order, since stream attribution and record ordering both depend on
/// block order.
#[derive(Debug)]
pub struct StreamEventAssembler {
    current: NamedStream,
}

impl StreamEventAssembler {
    pub fn new() -> Self {
        StreamEventAssembler {
            current: NamedStream::unnamed(),
        }
    }

    /// Handle a StreamName block: channel index at offset 8, channel name
    /// NUL-padded from offset 14 up to the 4-byte block trailer.
    pub fn begin_stream(&mut self, block: &[u8], block_offset: usize) -> Result<()> {
        let channel = i16_at(block, 8).ok_or_else(|| MpxError::MalformedBlock {
            offset: block_offset,
            reason: "stream name block too short".to_string(),
        })?;
        let channel_name = block
            .get(14..block.len().saturating_sub(4))
            .map(decode_padded_str)
            .unwrap_or_default();

        debug!("stream context: channel {channel} ({channel_name:?})");
        self.current = NamedStream {
            channel_name,
            channel,
            records: Vec::new(),
        };
        Ok(())
    }

    /// Broadcast one event block to every registered parser, appending
    /// matches to the current stream in file order.
    pub fn on_event(&mut self, event: &[u8], registry: &CommandParserRegistry) {
        registry.dispatch(event, &mut self.current.records);
    }

    /// The stream context in effect at end of scan.
    pub fn finish(self) -> NamedStream {
        self.current
    }
}

impl Default for StreamEventAssembler {
    fn default() -> Self {
        Self::new()
    }
}
