// src/lib.rs
//! # mpx-rs
//!
//! A Rust library for decoding MPX capture files, the monolithic binary
//! format produced by Alpha Omega neurophysiology acquisition devices.
//! One file interleaves a session header, per-channel analog/digital
//! sample data, channel metadata, and a time-ordered sequence of device
//! command/status events.
//!
//! The decoder is a forward-only scan over self-describing, length-prefixed
//! blocks, run twice: the first pass tallies per-channel sample counts (the
//! final buffer size is only knowable after every data block has been
//! seen) and processes stream/event blocks in file order; the second pass
//! decodes channel definitions into descriptors with exactly-sized buffers
//! and fills them. Embedded command/status events are broadcast to an open,
//! pluggable set of per-command-type parsers.
//!
//! Decoding is read-only and fully synchronous: one in-memory file in, one
//! frozen [`MpxCapture`] out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mpx_rs::*;
//!
//! fn main() -> Result<()> {
//!     let reader = MpxReader::open("session.mpx")?;
//!     let capture = reader.decode_with_defaults()?;
//!
//!     if let Some(header) = &capture.header {
//!         println!("recorded {}", header.session_date_time);
//!     }
//!     for (id, channel) in &capture.data {
//!         println!("channel {id}: {} ({} samples)", channel.name, channel.sample_count());
//!     }
//!     for record in &capture.stream.records {
//!         println!("{:?}", record.kind);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Custom parser sets
//!
//! Dispatch is broadcast: every parser sees every event block, and only a
//! full discriminator match produces a record. Restricting or extending the
//! set is purely additive:
//!
//! ```rust,no_run
//! use mpx_rs::*;
//! use mpx_rs::commands::parsers;
//!
//! # fn main() -> Result<()> {
//! let mut registry = CommandParserRegistry::empty();
//! registry.register(parsers::parse_stim_start);
//! registry.register(parsers::parse_stim_stop);
//!
//! let capture = MpxReader::open("session.mpx")?.decode(&registry)?;
//! # Ok(())
//! # }
//! ```

// Modules
pub mod block;
pub mod channel;
pub mod commands;
pub mod error;
pub mod header;
pub mod reader;
pub mod stream;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{MpxError, Result};

pub use block::{Block, BlockScanner, BlockTag};

pub use channel::{
    AnalogGeometry, ChannelDescriptor, ChannelId, ChannelKind, ChannelTally, DigitalSample,
    TriggerSettings,
};

pub use commands::{CommandParser, CommandParserRegistry, RecordKind, StreamRecord};

pub use header::SessionHeader;

pub use reader::{decode, MpxCapture, MpxReader};

pub use stream::NamedStream;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use mpx_rs::prelude::*;
    //! ```

    pub use crate::commands::{CommandParserRegistry, RecordKind, StreamRecord};
    pub use crate::error::{MpxError, Result};
    pub use crate::reader::{decode, MpxCapture, MpxReader};
    pub use crate::{ChannelDescriptor, ChannelKind, SessionHeader};
}

/// The MPX data format version this library targets.
pub const MPX_FORMAT_VERSION: u8 = 4;

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert_eq!(MPX_FORMAT_VERSION, 4);
        assert!(!LIBRARY_VERSION.is_empty());
    }

    #[test]
    fn test_block_tag_bytes() {
        assert_eq!(BlockTag::from_byte(104), BlockTag::Header);
        assert_eq!(BlockTag::from_byte(50), BlockTag::ChannelDefinition);
        assert_eq!(BlockTag::from_byte(53), BlockTag::ChannelData);
        assert_eq!(BlockTag::from_byte(83), BlockTag::StreamName);
        assert_eq!(BlockTag::from_byte(69), BlockTag::Event);
        assert_eq!(BlockTag::from_byte(0), BlockTag::Unknown(0));
    }
}
