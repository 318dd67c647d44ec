// src/channel/catalog.rs
use crate::block::Block;
use crate::channel::descriptor::{
    AnalogGeometry, ChannelDescriptor, ChannelId, ChannelKind, DigitalSample, TriggerSettings,
};
use crate::error::{MpxError, Result};
use crate::utils::{decode_cstr, f32_array_at, f32_at, i16_at};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Per-channel Pass-1 counts.
///
/// Both units are tracked because the right one — half-words for analog
/// channels, one record per block for digital channels — is only knowable
/// once the channel's definition (or its absence) is resolved in Pass 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelTally {
    /// Total `(length - 10) / 2` half-word count across the channel's data
    /// blocks.
    pub half_words: usize,
    /// Number of data blocks seen for the channel.
    pub blocks: usize,
}

/// Pass-1 accumulator: tallies data blocks and records the location of
/// definition and data blocks for the second pass.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    tallies: BTreeMap<ChannelId, ChannelTally>,
    definitions: Vec<Block>,
    data_blocks: Vec<Block>,
}

/// The built catalog: descriptors with their buffers preallocated to the
/// exact Pass-1 size, plus the recorded data blocks awaiting the fill pass.
#[derive(Debug)]
pub struct ChannelCatalog {
    pub channels: BTreeMap<ChannelId, ChannelDescriptor>,
    pub tallies: BTreeMap<ChannelId, ChannelTally>,
    pub data_blocks: Vec<Block>,
}

/// Minimum data block length: length + tag + padding + ChannelID + the
/// 4-byte trailer, with no payload.
const MIN_DATA_BLOCK_LEN: usize = 10;

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one ChannelData block and retain its location for the fill pass.
    pub fn observe_data(&mut self, capture: &[u8], block: Block) -> Result<()> {
        if block.length < MIN_DATA_BLOCK_LEN {
            return Err(MpxError::MalformedBlock {
                offset: block.offset,
                reason: format!("data block too short ({} bytes)", block.length),
            });
        }
        let bytes = block.bytes(capture);
        let channel_id = i16_at(bytes, 4).ok_or_else(|| MpxError::MalformedBlock {
            offset: block.offset,
            reason: "data block missing channel id".to_string(),
        })?;

        let tally = self.tallies.entry(channel_id).or_default();
        tally.half_words += (block.length - MIN_DATA_BLOCK_LEN) / 2;
        tally.blocks += 1;
        self.data_blocks.push(block);
        Ok(())
    }

    /// Record a ChannelDefinition block; decoding is deferred to `build`,
    /// once every data block has been tallied.
    pub fn observe_definition(&mut self, block: Block) {
        self.definitions.push(block);
    }

    pub fn tallies(&self) -> &BTreeMap<ChannelId, ChannelTally> {
        &self.tallies
    }

    /// Pass 2, define step: decode each recorded definition whose ChannelID
    /// has at least one tallied data block, then synthesize a Digital
    /// descriptor (mode -1) for every tallied ChannelID left undefined.
    pub fn build(self, capture: &[u8]) -> Result<ChannelCatalog> {
        let mut channels: BTreeMap<ChannelId, ChannelDescriptor> = BTreeMap::new();

        for block in &self.definitions {
            let bytes = block.bytes(capture);
            let channel_id =
                i16_at(bytes, 12).ok_or_else(|| short_definition(block.offset, block.length))?;

            let Some(tally) = self.tallies.get(&channel_id) else {
                debug!("dropping definition for channel {channel_id}: no data blocks");
                continue;
            };

            let descriptor = decode_definition(bytes, block.offset, channel_id, *tally)?;
            if channels.insert(channel_id, descriptor).is_some() {
                warn!("duplicate definition for channel {channel_id}; keeping the later one");
            }
        }

        for (&channel_id, tally) in &self.tallies {
            if !channels.contains_key(&channel_id) {
                debug!(
                    "channel {channel_id} has {} data blocks but no definition; synthesizing digital",
                    tally.blocks
                );
                channels.insert(
                    channel_id,
                    ChannelDescriptor {
                        channel_id,
                        is_analog: false,
                        is_input: false,
                        name: String::new(),
                        kind: ChannelKind::Digital {
                            mode: -1,
                            sampling_rate: 0.0,
                            save_trigger: 0,
                            duration: 0.0,
                            previous_state: 0,
                            samples: vec![DigitalSample::default(); tally.blocks],
                        },
                    },
                );
            }
        }

        Ok(ChannelCatalog {
            channels,
            tallies: self.tallies,
            data_blocks: self.data_blocks,
        })
    }
}

fn short_definition(offset: usize, length: usize) -> MpxError {
    MpxError::MalformedBlock {
        offset,
        reason: format!("definition block too short ({length} bytes)"),
    }
}

fn decode_definition(
    bytes: &[u8],
    offset: usize,
    channel_id: ChannelId,
    tally: ChannelTally,
) -> Result<ChannelDescriptor> {
    let is_analog = i16_at(bytes, 8).ok_or_else(|| short_definition(offset, bytes.len()))? == 1;
    let is_input = i16_at(bytes, 10).ok_or_else(|| short_definition(offset, bytes.len()))? == 1;

    let (name, kind) = if is_analog {
        decode_analog(bytes, offset, channel_id, tally)?
    } else {
        decode_digital(bytes, offset, tally)?
    };

    Ok(ChannelDescriptor {
        channel_id,
        is_analog,
        is_input,
        name,
        kind,
    })
}

fn decode_analog(
    bytes: &[u8],
    offset: usize,
    channel_id: ChannelId,
    tally: ChannelTally,
) -> Result<(String, ChannelKind)> {
    let short = || short_definition(offset, bytes.len());
    let mode = i16_at(bytes, 18).ok_or_else(short)?;
    let samples = vec![0i16; tally.half_words];

    match mode {
        0 | 1 => {
            let geometry = AnalogGeometry {
                bit_resolution: f32_at(bytes, 20).ok_or_else(short)?,
                sampling_rate: f32_at(bytes, 24).ok_or_else(short)? * 1000.0,
                block_size: i16_at(bytes, 28).ok_or_else(short)?,
                shape: i16_at(bytes, 30).ok_or_else(short)?,
            };
            if mode == 0 {
                let duration = f32_at(bytes, 32).ok_or_else(short)?;
                let total_gain = i16_at(bytes, 36).ok_or_else(short)?;
                let name = decode_cstr(bytes.get(38..).ok_or_else(short)?);
                Ok((
                    name,
                    ChannelKind::ContinuousAnalog {
                        geometry,
                        duration,
                        total_gain,
                        samples,
                    },
                ))
            } else {
                let trigger = TriggerSettings {
                    time_range: f32_array_at::<2>(bytes, 32).ok_or_else(short)?,
                    level: i16_at(bytes, 40).ok_or_else(short)?,
                    mode: i16_at(bytes, 42).ok_or_else(short)?,
                    is_rms: i16_at(bytes, 44).ok_or_else(short)? == 1,
                };
                let total_gain = i16_at(bytes, 46).ok_or_else(short)?;
                let name = decode_cstr(bytes.get(48..).ok_or_else(short)?);
                Ok((
                    name,
                    ChannelKind::SegmentedAnalog {
                        geometry,
                        trigger,
                        total_gain,
                        samples,
                    },
                ))
            }
        }
        // Older MPX versions carry modes this decoder has no layout for.
        other => Ok((
            format!("Unknown_{channel_id}"),
            ChannelKind::UnknownAnalog {
                mode: other,
                samples,
            },
        )),
    }
}

fn decode_digital(
    bytes: &[u8],
    offset: usize,
    tally: ChannelTally,
) -> Result<(String, ChannelKind)> {
    let short = || short_definition(offset, bytes.len());
    let kind = ChannelKind::Digital {
        mode: 0,
        sampling_rate: f32_at(bytes, 18).ok_or_else(short)? * 1000.0,
        save_trigger: i16_at(bytes, 22).ok_or_else(short)?,
        duration: f32_at(bytes, 24).ok_or_else(short)?,
        previous_state: i16_at(bytes, 28).ok_or_else(short)?,
        samples: vec![DigitalSample::default(); tally.blocks],
    };
    let name = decode_cstr(bytes.get(30..).ok_or_else(short)?);
    Ok((name, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockTag;
    use byteorder::{ByteOrder, LittleEndian};

    fn data_block(offset: usize, channel_id: i16, half_words: usize) -> (Vec<u8>, Block) {
        let length = MIN_DATA_BLOCK_LEN + half_words * 2;
        let mut bytes = vec![0u8; length];
        LittleEndian::write_u16(&mut bytes[0..2], length as u16);
        bytes[2] = b'5';
        LittleEndian::write_i16(&mut bytes[4..6], channel_id);
        let block = Block {
            offset,
            length,
            tag: BlockTag::ChannelData,
        };
        (bytes, block)
    }

    fn continuous_definition(channel_id: i16, name: &str) -> Vec<u8> {
        let mut bytes = vec![0u8; 38 + name.len() + 1];
        let bytes_len = bytes.len() as u16;
        LittleEndian::write_u16(&mut bytes[0..2], bytes_len);
        bytes[2] = b'2';
        LittleEndian::write_i16(&mut bytes[8..10], 1); // isAnalog
        LittleEndian::write_i16(&mut bytes[10..12], 1); // isInput
        LittleEndian::write_i16(&mut bytes[12..14], channel_id);
        LittleEndian::write_i16(&mut bytes[18..20], 0); // Mode
        LittleEndian::write_f32(&mut bytes[20..24], 0.25); // BitResolution
        LittleEndian::write_f32(&mut bytes[24..28], 44.0); // kHz
        LittleEndian::write_i16(&mut bytes[28..30], 16); // BlockSize
        LittleEndian::write_i16(&mut bytes[30..32], 1); // Shape
        LittleEndian::write_f32(&mut bytes[32..36], 30.0); // Duration
        LittleEndian::write_i16(&mut bytes[36..38], 20); // TotalGain
        bytes[38..38 + name.len()].copy_from_slice(name.as_bytes());
        bytes
    }

    #[test]
    fn test_tally_tracks_both_units() {
        let mut builder = CatalogBuilder::new();
        let (bytes_a, _) = data_block(0, 3, 8);
        let (bytes_b, _) = data_block(bytes_a.len(), 3, 4);
        let mut capture = bytes_a;
        let second_offset = capture.len();
        capture.extend(bytes_b);

        builder
            .observe_data(
                &capture,
                Block {
                    offset: 0,
                    length: second_offset,
                    tag: BlockTag::ChannelData,
                },
            )
            .unwrap();
        builder
            .observe_data(
                &capture,
                Block {
                    offset: second_offset,
                    length: capture.len() - second_offset,
                    tag: BlockTag::ChannelData,
                },
            )
            .unwrap();

        let tally = builder.tallies()[&3];
        assert_eq!(tally.half_words, 12);
        assert_eq!(tally.blocks, 2);
    }

    #[test]
    fn test_definition_without_data_is_dropped() {
        let capture = continuous_definition(9, "SPK 09");
        let mut builder = CatalogBuilder::new();
        builder.observe_definition(Block {
            offset: 0,
            length: capture.len(),
            tag: BlockTag::ChannelDefinition,
        });

        let catalog = builder.build(&capture).unwrap();
        assert!(catalog.channels.is_empty());
    }

    #[test]
    fn test_data_without_definition_synthesizes_digital() {
        let (capture, block) = data_block(0, 5, 2);
        let mut builder = CatalogBuilder::new();
        builder.observe_data(&capture, block).unwrap();

        let catalog = builder.build(&capture).unwrap();
        let descriptor = &catalog.channels[&5];
        assert!(!descriptor.is_analog);
        assert_eq!(descriptor.mode(), -1);
        assert_eq!(descriptor.digital_samples().unwrap().len(), 1);
    }

    #[test]
    fn test_continuous_definition_buffer_sized_by_half_words() {
        let (mut capture, data) = data_block(0, 3, 6);
        let definition_offset = capture.len();
        let definition = continuous_definition(3, "RAW 03");
        let definition_len = definition.len();
        capture.extend(definition);

        let mut builder = CatalogBuilder::new();
        builder.observe_data(&capture, data).unwrap();
        builder.observe_definition(Block {
            offset: definition_offset,
            length: definition_len,
            tag: BlockTag::ChannelDefinition,
        });

        let catalog = builder.build(&capture).unwrap();
        let descriptor = &catalog.channels[&3];
        assert_eq!(descriptor.name, "RAW 03");
        assert!(descriptor.is_analog);
        assert_eq!(descriptor.mode(), 0);
        assert_eq!(descriptor.analog_samples().unwrap().len(), 6);
        match &descriptor.kind {
            ChannelKind::ContinuousAnalog {
                geometry,
                duration,
                total_gain,
                ..
            } => {
                assert_eq!(geometry.sampling_rate, 44_000.0);
                assert_eq!(geometry.block_size, 16);
                assert_eq!(*duration, 30.0);
                assert_eq!(*total_gain, 20);
            }
            other => panic!("expected continuous analog, got {other:?}"),
        }
    }
}
