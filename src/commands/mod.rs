// src/commands/mod.rs
pub mod codes;
pub mod parsers;

mod record;
mod registry;

pub use record::{RecordKind, StreamRecord};
pub use registry::{CommandParser, CommandParserRegistry};
