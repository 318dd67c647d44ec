// src/channel/assembler.rs
use crate::block::Block;
use crate::channel::catalog::ChannelCatalog;
use crate::channel::descriptor::{ChannelDescriptor, ChannelId, ChannelKind, DigitalSample};
use crate::error::{MpxError, Result};
use crate::utils::{i16_at, u16_at, u32_at};
use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use std::collections::BTreeMap;

/// Pass 2, fill step: replays the recorded ChannelData blocks into the
/// preallocated sample buffers.
///
/// Write cursors live in their own map, never aliased with the Pass-1
/// tallies, so each pass can be tested on its own. Buffers are fixed-size;
/// a block that would write past the end of its buffer, or a final cursor
/// that does not land exactly on the tally, is a `MalformedBlock` — never a
/// silent resize or truncation.
pub struct ChannelDataAssembler {
    cursors: BTreeMap<ChannelId, usize>,
}

impl ChannelDataAssembler {
    pub fn new() -> Self {
        ChannelDataAssembler {
            cursors: BTreeMap::new(),
        }
    }

    /// Consume the catalog, fill every buffer, and return the frozen
    /// channel map.
    pub fn assemble(
        mut self,
        capture: &[u8],
        catalog: ChannelCatalog,
    ) -> Result<BTreeMap<ChannelId, ChannelDescriptor>> {
        let ChannelCatalog {
            mut channels,
            data_blocks,
            ..
        } = catalog;

        for block in &data_blocks {
            self.fill_block(capture, *block, &mut channels)?;
        }
        self.check_exact_fill(&channels)?;

        debug!(
            "assembled {} channels from {} data blocks",
            channels.len(),
            data_blocks.len()
        );
        Ok(channels)
    }

    fn fill_block(
        &mut self,
        capture: &[u8],
        block: Block,
        channels: &mut BTreeMap<ChannelId, ChannelDescriptor>,
    ) -> Result<()> {
        let bytes = block.bytes(capture);
        let channel_id = i16_at(bytes, 4).ok_or_else(|| MpxError::MalformedBlock {
            offset: block.offset,
            reason: "data block missing channel id".to_string(),
        })?;

        // Unreachable for a catalog built from the same scan; kept as an
        // internal-consistency check.
        let descriptor = channels
            .get_mut(&channel_id)
            .ok_or(MpxError::UnknownChannel {
                channel: channel_id,
                offset: block.offset,
            })?;
        let cursor = self.cursors.entry(channel_id).or_insert(0);

        match &mut descriptor.kind {
            ChannelKind::ContinuousAnalog { samples, .. }
            | ChannelKind::SegmentedAnalog { samples, .. }
            | ChannelKind::UnknownAnalog { samples, .. } => {
                let count = (block.length - 10) / 2;
                let payload = &bytes[6..6 + count * 2];
                let end = *cursor + count;
                if end > samples.len() {
                    return Err(overfill(block.offset, channel_id, samples.len()));
                }
                LittleEndian::read_i16_into(payload, &mut samples[*cursor..end]);
                *cursor = end;
            }
            ChannelKind::Digital { samples, .. } => {
                let state = u16_at(bytes, 6).ok_or_else(|| short_digital(block.offset))?;
                let timestamp = u32_at(bytes, 8).ok_or_else(|| short_digital(block.offset))?;
                if *cursor >= samples.len() {
                    return Err(overfill(block.offset, channel_id, samples.len()));
                }
                samples[*cursor] = DigitalSample { timestamp, state };
                *cursor += 1;
            }
        }
        Ok(())
    }

    fn check_exact_fill(&self, channels: &BTreeMap<ChannelId, ChannelDescriptor>) -> Result<()> {
        for (channel_id, descriptor) in channels {
            let filled = self.cursors.get(channel_id).copied().unwrap_or(0);
            let expected = descriptor.sample_count();
            if filled != expected {
                return Err(MpxError::MalformedBlock {
                    offset: 0,
                    reason: format!(
                        "channel {channel_id} underfilled: {filled} of {expected} samples"
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for ChannelDataAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn overfill(offset: usize, channel: ChannelId, capacity: usize) -> MpxError {
    MpxError::MalformedBlock {
        offset,
        reason: format!("channel {channel} overfilled past its tally of {capacity}"),
    }
}

fn short_digital(offset: usize) -> MpxError {
    MpxError::MalformedBlock {
        offset,
        reason: "digital data block too short".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockTag;
    use crate::channel::catalog::CatalogBuilder;

    fn push_data_block(capture: &mut Vec<u8>, channel_id: i16, samples: &[i16]) -> Block {
        let offset = capture.len();
        let length = 10 + samples.len() * 2;
        let mut bytes = vec![0u8; length];
        LittleEndian::write_u16(&mut bytes[0..2], length as u16);
        bytes[2] = b'5';
        LittleEndian::write_i16(&mut bytes[4..6], channel_id);
        LittleEndian::write_i16_into(samples, &mut bytes[6..6 + samples.len() * 2]);
        capture.extend(bytes);
        Block {
            offset,
            length,
            tag: BlockTag::ChannelData,
        }
    }

    fn push_digital_block(capture: &mut Vec<u8>, channel_id: i16, state: u16, ts: u32) -> Block {
        let offset = capture.len();
        let length = 16;
        let mut bytes = vec![0u8; length];
        LittleEndian::write_u16(&mut bytes[0..2], length as u16);
        bytes[2] = b'5';
        LittleEndian::write_i16(&mut bytes[4..6], channel_id);
        LittleEndian::write_u16(&mut bytes[6..8], state);
        LittleEndian::write_u32(&mut bytes[8..12], ts);
        capture.extend(bytes);
        Block {
            offset,
            length,
            tag: BlockTag::ChannelData,
        }
    }

    #[test]
    fn test_digital_fill_one_row_per_block() {
        let mut capture = Vec::new();
        let a = push_digital_block(&mut capture, 4, 1, 100);
        let b = push_digital_block(&mut capture, 4, 0, 250);

        let mut builder = CatalogBuilder::new();
        builder.observe_data(&capture, a).unwrap();
        builder.observe_data(&capture, b).unwrap();
        let catalog = builder.build(&capture).unwrap();

        let channels = ChannelDataAssembler::new()
            .assemble(&capture, catalog)
            .unwrap();
        let samples = channels[&4].digital_samples().unwrap();
        assert_eq!(
            samples,
            &[
                DigitalSample {
                    timestamp: 100,
                    state: 1
                },
                DigitalSample {
                    timestamp: 250,
                    state: 0
                },
            ]
        );
    }

    #[test]
    fn test_analog_fill_concatenates_blocks_in_order() {
        // Channel 2 has no definition block, so it synthesizes as digital;
        // give it a definition by hand instead.
        let mut capture = Vec::new();
        let a = push_data_block(&mut capture, 2, &[1, -2, 3]);
        let b = push_data_block(&mut capture, 2, &[4, 5]);

        let mut builder = CatalogBuilder::new();
        builder.observe_data(&capture, a).unwrap();
        builder.observe_data(&capture, b).unwrap();
        let mut catalog = builder.build(&capture).unwrap();

        let tally = catalog.tallies[&2];
        catalog.channels.insert(
            2,
            ChannelDescriptor {
                channel_id: 2,
                is_analog: true,
                is_input: true,
                name: "RAW 02".to_string(),
                kind: ChannelKind::UnknownAnalog {
                    mode: 3,
                    samples: vec![0; tally.half_words],
                },
            },
        );

        let channels = ChannelDataAssembler::new()
            .assemble(&capture, catalog)
            .unwrap();
        assert_eq!(channels[&2].analog_samples().unwrap(), &[1, -2, 3, 4, 5]);
    }

    #[test]
    fn test_overfill_is_rejected() {
        let mut capture = Vec::new();
        let a = push_data_block(&mut capture, 2, &[1, 2]);
        let b = push_data_block(&mut capture, 2, &[3, 4]);

        let mut builder = CatalogBuilder::new();
        builder.observe_data(&capture, a).unwrap();
        builder.observe_data(&capture, b).unwrap();
        let mut catalog = builder.build(&capture).unwrap();

        // Shrink the buffer below the tally to force the bounds check.
        catalog.channels.insert(
            2,
            ChannelDescriptor {
                channel_id: 2,
                is_analog: true,
                is_input: true,
                name: String::new(),
                kind: ChannelKind::UnknownAnalog {
                    mode: 9,
                    samples: vec![0; 3],
                },
            },
        );

        let result = ChannelDataAssembler::new().assemble(&capture, catalog);
        assert!(matches!(result, Err(MpxError::MalformedBlock { .. })));
    }
}
