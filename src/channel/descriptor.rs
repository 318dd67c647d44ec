// src/channel/descriptor.rs

/// Channels are identified on the wire by a signed 16-bit ID.
pub type ChannelId = i16;

/// One decoded digital transition: the device timestamp and the port state
/// after the transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitalSample {
    pub timestamp: u32,
    pub state: u16,
}

/// Acquisition geometry shared by continuous and segmented analog channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogGeometry {
    pub bit_resolution: f32,
    /// Samples per second (the wire stores kHz; this is already scaled).
    pub sampling_rate: f32,
    pub block_size: i16,
    pub shape: i16,
}

/// Trigger settings carried only by segmented analog channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSettings {
    /// Pre/post-trigger capture window, in milliseconds.
    pub time_range: [f32; 2],
    pub level: i16,
    pub mode: i16,
    pub is_rms: bool,
}

/// The variant of a channel, each carrying only its own geometry plus its
/// owned sample buffer. Buffers are sized once from the Pass-1 tally and
/// never grow.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelKind {
    /// Analog channel with Mode 0: a continuous run of signed 16-bit samples.
    ContinuousAnalog {
        geometry: AnalogGeometry,
        /// Recording duration in seconds.
        duration: f32,
        total_gain: i16,
        samples: Vec<i16>,
    },
    /// Analog channel with Mode 1: trigger-aligned segments.
    SegmentedAnalog {
        geometry: AnalogGeometry,
        trigger: TriggerSettings,
        total_gain: i16,
        samples: Vec<i16>,
    },
    /// Analog channel with a mode this decoder does not know (older MPX
    /// versions). No typed geometry; the tally-sized buffer is still filled.
    UnknownAnalog { mode: i16, samples: Vec<i16> },
    /// Digital event channel: one (timestamp, state) row per data block.
    ///
    /// `mode` is -1 for descriptors synthesized for a ChannelID that had
    /// data blocks but no definition block; such descriptors carry zeroed
    /// geometry and an empty name.
    Digital {
        mode: i16,
        sampling_rate: f32,
        save_trigger: i16,
        /// Recording duration in seconds.
        duration: f32,
        previous_state: i16,
        samples: Vec<DigitalSample>,
    },
}

/// A fully decoded channel: identity, direction flags, display name, and
/// the variant-specific geometry and sample buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDescriptor {
    pub channel_id: ChannelId,
    pub is_analog: bool,
    pub is_input: bool,
    pub name: String,
    pub kind: ChannelKind,
}

impl ChannelDescriptor {
    /// The channel's sub-format mode: 0 continuous, 1 segmented, the raw
    /// mode for unknown analog channels, and -1 for synthesized digital
    /// descriptors.
    pub fn mode(&self) -> i16 {
        match &self.kind {
            ChannelKind::ContinuousAnalog { .. } => 0,
            ChannelKind::SegmentedAnalog { .. } => 1,
            ChannelKind::UnknownAnalog { mode, .. } => *mode,
            ChannelKind::Digital { mode, .. } => *mode,
        }
    }

    /// Number of decoded samples: half-words for analog channels, rows for
    /// digital channels.
    pub fn sample_count(&self) -> usize {
        match &self.kind {
            ChannelKind::ContinuousAnalog { samples, .. }
            | ChannelKind::SegmentedAnalog { samples, .. }
            | ChannelKind::UnknownAnalog { samples, .. } => samples.len(),
            ChannelKind::Digital { samples, .. } => samples.len(),
        }
    }

    /// The analog sample buffer, if this is an analog channel.
    pub fn analog_samples(&self) -> Option<&[i16]> {
        match &self.kind {
            ChannelKind::ContinuousAnalog { samples, .. }
            | ChannelKind::SegmentedAnalog { samples, .. }
            | ChannelKind::UnknownAnalog { samples, .. } => Some(samples),
            ChannelKind::Digital { .. } => None,
        }
    }

    /// The digital sample buffer, if this is a digital channel.
    pub fn digital_samples(&self) -> Option<&[DigitalSample]> {
        match &self.kind {
            ChannelKind::Digital { samples, .. } => Some(samples),
            _ => None,
        }
    }
}
