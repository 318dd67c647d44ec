// src/commands/record.rs

/// One decoded command/status record attached to a stream.
///
/// The device timestamp and raw status byte are common to every event; the
/// command-specific payload lives in the tagged [`RecordKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRecord {
    /// Device tick counter at offset 4 of the event block.
    pub timestamp: u32,
    /// Raw byte at offset 11, following the class discriminator.
    pub status_byte: u8,
    pub kind: RecordKind,
}

/// The command-specific payload, one case per recognized package type.
/// Each variant owns only the fields its wire layout defines.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    ChannelDownSample {
        channel_id: i16,
        down_sample_factor: i16,
    },
    PortAsStrobe {
        channel_id: i16,
        strobe: bool,
    },
    ChannelState {
        channel_id: i16,
        acquisition_on: bool,
    },
    TextMessage {
        real_timestamp: u32,
        message: String,
    },
    TemplMatchTemplChange {
        channel_id: i16,
        template_id: i16,
        n_points: i16,
        template_points: [i16; 16],
        template_mode: i16,
    },
    TemplMatchThreshold {
        channel_id: i16,
        template_id: i16,
        threshold: u16,
        noise_level: u16,
    },
    TemplMatchSpikesSelector {
        channel_id: i16,
        enabled: i16,
        template_id: i16,
        x_coord: i16,
        y_coord: [i16; 2],
        spike_selector: i16,
    },
    TrajSettings {
        trajectory_index: i16,
        trajectory_side: i16,
        ben_gun_type: i16,
        ben_gun_electrode_map: [i16; 5],
        max_electrode: i16,
        center_pos_x: f32,
        center_pos_y: f32,
        start_depth: f32,
        target_depth: f32,
        macro_micro_distance: f32,
        lead_type: i16,
    },
    ModuleStimulus {
        destination_id: i16,
        stimulation_channel: i16,
        stimulation_return: i16,
        stimulation_type: i16,
        amplitudes: [i16; 2],
        pulse_widths: [i16; 2],
        duration: i32,
        frequency: i16,
        stop_rec_channel_mask: i16,
        stop_rec_group_id: i16,
        inc_step_size: i16,
        pulse_delays: [i16; 2],
        analog_stim: i16,
        analog_wave_id: i16,
    },
    ModuleElectrodeParam {
        destination_id: i16,
        channel_id: i16,
        impedance_wave: [i16; 2],
        hs_gain: i16,
        contact_type: i16,
        pre_gain: i16,
    },
    StimStart {
        channel_id: i16,
    },
    StimStop {
        channel_id: i16,
    },
    MotorSetPos {
        motor_id: i16,
        position: i32,
    },
    MotorSetSpeed {
        motor_id: i16,
        speed: i32,
    },
    MotorConfig {
        motor_id: i16,
        position: i32,
        zero_position: i32,
        target_position: i32,
        start_position: i32,
        speed: i32,
        range: i32,
    },
    ChannelChange {
        channel_id: i16,
        level: i16,
        direction: i16,
        gain: i16,
        enabled: bool,
    },
    FilterParams {
        down_sample_factor: i16,
        filter_params: i32,
        channel_id: i16,
        filter_type: i16,
        coefficients: [i16; 20],
        n_coefficients: i16,
    },
    ImpedanceValues {
        channel_mask: i16,
        impedances: [i32; 16],
        channel_group_id: i16,
    },
    StimStatus {
        channel_id: i16,
        frequency_deviation: i16,
        stim_status: i16,
        measured_amplitudes: [i16; 2],
    },
}

impl StreamRecord {
    /// Whether this record came from a status package rather than a command.
    pub fn is_status(&self) -> bool {
        matches!(self.kind, RecordKind::StimStatus { .. })
    }
}
