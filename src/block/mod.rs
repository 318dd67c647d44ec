// src/block/mod.rs
mod scanner;

pub use scanner::BlockScanner;

/// Block classification, keyed by the tag byte at offset 2 of every block.
///
/// The tag bytes are ASCII characters in the on-disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// `'h'` — the single session header block.
    Header,
    /// `'2'` — channel definition block.
    ChannelDefinition,
    /// `'5'` — channel sample data block.
    ChannelData,
    /// `'S'` — stream name block; opens a new named stream context.
    StreamName,
    /// `'E'` — device command/status event block.
    Event,
    /// Any other tag byte; scanned over with no effect.
    Unknown(u8),
}

impl BlockTag {
    pub const HEADER: u8 = b'h';
    pub const CHANNEL_DEFINITION: u8 = b'2';
    pub const CHANNEL_DATA: u8 = b'5';
    pub const STREAM_NAME: u8 = b'S';
    pub const EVENT: u8 = b'E';

    pub fn from_byte(byte: u8) -> Self {
        match byte {
            Self::HEADER => BlockTag::Header,
            Self::CHANNEL_DEFINITION => BlockTag::ChannelDefinition,
            Self::CHANNEL_DATA => BlockTag::ChannelData,
            Self::STREAM_NAME => BlockTag::StreamName,
            Self::EVENT => BlockTag::Event,
            other => BlockTag::Unknown(other),
        }
    }
}

/// A transient view of one block: its absolute offset in the capture, its
/// declared length, and its classified tag. Blocks are never persisted past
/// the scan that produced them.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub offset: usize,
    pub length: usize,
    pub tag: BlockTag,
}

impl Block {
    /// The bytes of this block, including the length/tag prefix.
    pub fn bytes<'a>(&self, capture: &'a [u8]) -> &'a [u8] {
        &capture[self.offset..self.offset + self.length]
    }
}
