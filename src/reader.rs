// src/reader.rs
use crate::block::{BlockScanner, BlockTag};
use crate::channel::{CatalogBuilder, ChannelDataAssembler, ChannelDescriptor, ChannelId};
use crate::commands::CommandParserRegistry;
use crate::error::Result;
use crate::header::SessionHeader;
use crate::stream::{NamedStream, StreamEventAssembler};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::fs::File;

/// The fully decoded capture, frozen once `decode` returns.
#[derive(Debug, Clone, PartialEq)]
pub struct MpxCapture {
    /// The session header, if the file carried a header block.
    pub header: Option<SessionHeader>,
    /// Channel descriptors keyed by ChannelID, in key order.
    pub data: BTreeMap<ChannelId, ChannelDescriptor>,
    /// The stream context in effect at end of file.
    pub stream: NamedStream,
}

/// Decode a complete in-memory capture.
///
/// A pure function of the byte buffer and the parser set: scanning and
/// buffer-sizing failures abort the whole decode, while an event block no
/// parser claims is simply skipped.
///
/// The first scan classifies every block — the header is captured
/// immediately, definition blocks are recorded, data blocks are tallied,
/// and stream/event blocks are processed in file order. The second pass
/// sizes each channel buffer from its tally and fills it.
pub fn decode(capture: &[u8], registry: &CommandParserRegistry) -> Result<MpxCapture> {
    let mut header = None;
    let mut builder = CatalogBuilder::new();
    let mut events = StreamEventAssembler::new();

    for block in BlockScanner::new(capture) {
        let block = block?;
        match block.tag {
            BlockTag::Header => {
                if header.is_none() {
                    header = Some(SessionHeader::decode(block.bytes(capture), block.offset)?);
                } else {
                    warn!("extra header block at offset {}; ignoring", block.offset);
                }
            }
            BlockTag::ChannelDefinition => builder.observe_definition(block),
            BlockTag::ChannelData => builder.observe_data(capture, block)?,
            BlockTag::StreamName => events.begin_stream(block.bytes(capture), block.offset)?,
            BlockTag::Event => events.on_event(block.bytes(capture), registry),
            BlockTag::Unknown(_) => {}
        }
    }

    let catalog = builder.build(capture)?;
    let data = ChannelDataAssembler::new().assemble(capture, catalog)?;
    let stream = events.finish();
    debug!(
        "decoded capture: {} channels, {} stream records",
        data.len(),
        stream.records.len()
    );

    Ok(MpxCapture {
        header,
        data,
        stream,
    })
}

/// One-shot batch reader: loads the whole file, then decodes it.
pub struct MpxReader<B: AsRef<[u8]>> {
    capture: B,
}

impl MpxReader<Vec<u8>> {
    /// Read the file into memory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(MpxReader {
            capture: fs::read(path)?,
        })
    }
}

#[cfg(feature = "mmap")]
impl MpxReader<Mmap> {
    /// Memory-map the file instead of copying it (requires the "mmap"
    /// feature).
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(MpxReader { capture: mmap })
    }
}

impl<B: AsRef<[u8]>> MpxReader<B> {
    /// Wrap an already-loaded capture buffer.
    pub fn new(capture: B) -> Self {
        MpxReader { capture }
    }

    /// The raw capture bytes.
    pub fn raw(&self) -> &[u8] {
        self.capture.as_ref()
    }

    /// Decode with an explicit parser set.
    pub fn decode(&self, registry: &CommandParserRegistry) -> Result<MpxCapture> {
        decode(self.capture.as_ref(), registry)
    }

    /// Decode with every built-in command parser registered.
    pub fn decode_with_defaults(&self) -> Result<MpxCapture> {
        self.decode(&CommandParserRegistry::with_defaults())
    }
}
