// src/channel/mod.rs
mod assembler;
mod catalog;
mod descriptor;

pub use assembler::ChannelDataAssembler;
pub use catalog::{CatalogBuilder, ChannelCatalog, ChannelTally};
pub use descriptor::{
    AnalogGeometry, ChannelDescriptor, ChannelId, ChannelKind, DigitalSample, TriggerSettings,
};
