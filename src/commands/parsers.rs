// src/commands/parsers.rs
//! One stateless parser per wire command/status code.
//!
//! Every parser follows the same contract: check the class byte at offset
//! 10, the package type at offset 12, and (for multiplexed classes) the
//! sub-type at offset 14; only on a full match extract the payload and
//! return a record. Any mismatch, including an event too short for the
//! parser's offsets, returns `None` — the designed no-op path that lets
//! unrelated parsers ignore events not addressed to them.

use crate::commands::codes::*;
use crate::commands::record::{RecordKind, StreamRecord};
use crate::utils::{
    decode_padded_str, f32_at, i16_array_at, i16_at, i32_array_at, i32_at, u16_at, u32_at, u8_at,
};

struct EventMeta {
    timestamp: u32,
    status_byte: u8,
}

impl EventMeta {
    fn record(self, kind: RecordKind) -> Option<StreamRecord> {
        Some(StreamRecord {
            timestamp: self.timestamp,
            status_byte: self.status_byte,
            kind,
        })
    }
}

fn classify(event: &[u8], class: u8, package_type: i16) -> Option<EventMeta> {
    if u8_at(event, 10)? != class || i16_at(event, 12)? != package_type {
        return None;
    }
    Some(EventMeta {
        timestamp: u32_at(event, 4)?,
        status_byte: u8_at(event, 11)?,
    })
}

fn command(event: &[u8], package_type: i16) -> Option<EventMeta> {
    classify(event, CLASS_COMMAND, package_type)
}

fn generic_message(event: &[u8], message_type: i16) -> Option<EventMeta> {
    let meta = command(event, CMD_GENERIC_MESSAGE)?;
    (i16_at(event, 14)? == message_type).then_some(meta)
}

/// Module-params packages carry a sub-type and a destination module ID.
fn module_params(event: &[u8], module_type: i16) -> Option<(EventMeta, i16)> {
    let meta = command(event, CMD_MODULE_PARAMS)?;
    if i16_at(event, 14)? != module_type {
        return None;
    }
    Some((meta, i16_at(event, 16)?))
}

pub fn parse_channel_down_sample(event: &[u8]) -> Option<StreamRecord> {
    let meta = generic_message(event, GENMES_CHANNEL_DOWN_SAMPLE)?;
    meta.record(RecordKind::ChannelDownSample {
        channel_id: i16_at(event, 16)?,
        down_sample_factor: i16_at(event, 20)?,
    })
}

pub fn parse_port_as_strobe(event: &[u8]) -> Option<StreamRecord> {
    let meta = generic_message(event, GENMES_PORT_AS_STROBE)?;
    meta.record(RecordKind::PortAsStrobe {
        channel_id: i16_at(event, 20)?,
        strobe: u8_at(event, 16)? == 1,
    })
}

pub fn parse_channel_state(event: &[u8]) -> Option<StreamRecord> {
    let meta = generic_message(event, GENMES_CHANNEL_STATE)?;
    meta.record(RecordKind::ChannelState {
        channel_id: i16_at(event, 16)?,
        acquisition_on: u8_at(event, 20)? == 1,
    })
}

pub fn parse_text_message(event: &[u8]) -> Option<StreamRecord> {
    let meta = generic_message(event, GENMES_TEXT_MESSAGE)?;
    meta.record(RecordKind::TextMessage {
        real_timestamp: u32_at(event, 16)?,
        message: decode_padded_str(event.get(22..)?),
    })
}

pub fn parse_templ_match_templ_change(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_TEMPL_MATCH_TEMPL_CHANGE)?;
    let [channel_id, template_id, n_points] = i16_array_at::<3>(event, 14)?;
    meta.record(RecordKind::TemplMatchTemplChange {
        channel_id,
        template_id,
        n_points,
        template_points: i16_array_at::<16>(event, 20)?,
        template_mode: i16_at(event, 52)?,
    })
}

pub fn parse_templ_match_threshold(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_TEMPL_MATCH_THRESHOLD)?;
    let [channel_id, template_id] = i16_array_at::<2>(event, 14)?;
    meta.record(RecordKind::TemplMatchThreshold {
        channel_id,
        template_id,
        threshold: u16_at(event, 18)?,
        noise_level: u16_at(event, 20)?,
    })
}

pub fn parse_templ_match_spikes_selector(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_TEMPL_MATCH_SPIKES_SELECTOR)?;
    let [channel_id, enabled, template_id, x_coord, y0, y1, spike_selector] =
        i16_array_at::<7>(event, 14)?;
    meta.record(RecordKind::TemplMatchSpikesSelector {
        channel_id,
        enabled,
        template_id,
        x_coord,
        y_coord: [y0, y1],
        spike_selector,
    })
}

pub fn parse_traj_settings(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_TRAJ_SETTINGS)?;
    let [trajectory_index, trajectory_side, ben_gun_type] = i16_array_at::<3>(event, 14)?;
    meta.record(RecordKind::TrajSettings {
        trajectory_index,
        trajectory_side,
        ben_gun_type,
        ben_gun_electrode_map: i16_array_at::<5>(event, 20)?,
        max_electrode: i16_at(event, 30)?,
        center_pos_x: f32_at(event, 32)?,
        center_pos_y: f32_at(event, 36)?,
        start_depth: f32_at(event, 40)?,
        target_depth: f32_at(event, 44)?,
        macro_micro_distance: f32_at(event, 48)?,
        lead_type: i16_at(event, 52)?,
    })
}

pub fn parse_module_stimulus(event: &[u8]) -> Option<StreamRecord> {
    let (meta, destination_id) = module_params(event, MODULE_STIMULUS)?;
    let [stimulation_channel, stimulation_return, stimulation_type] = i16_array_at::<3>(event, 18)?;
    let [frequency, stop_rec_channel_mask, stop_rec_group_id, inc_step_size] =
        i16_array_at::<4>(event, 36)?;
    let [analog_stim, analog_wave_id] = i16_array_at::<2>(event, 50)?;
    meta.record(RecordKind::ModuleStimulus {
        destination_id,
        stimulation_channel,
        stimulation_return,
        stimulation_type,
        amplitudes: i16_array_at::<2>(event, 24)?,
        pulse_widths: i16_array_at::<2>(event, 28)?,
        duration: i32_at(event, 32)?,
        frequency,
        stop_rec_channel_mask,
        stop_rec_group_id,
        inc_step_size,
        pulse_delays: i16_array_at::<2>(event, 46)?,
        analog_stim,
        analog_wave_id,
    })
}

pub fn parse_module_electrode_param(event: &[u8]) -> Option<StreamRecord> {
    let (meta, destination_id) = module_params(event, MODULE_ELECTRODE_PARAM)?;
    let [impedance_low, channel_id, impedance_high] = i16_array_at::<3>(event, 26)?;
    meta.record(RecordKind::ModuleElectrodeParam {
        destination_id,
        channel_id,
        impedance_wave: [impedance_low, impedance_high],
        hs_gain: i16_at(event, 34)?,
        contact_type: i16_at(event, 38)?,
        pre_gain: i16_at(event, 42)?,
    })
}

pub fn parse_stim_start(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_STIM_START)?;
    meta.record(RecordKind::StimStart {
        channel_id: i16_at(event, 14)?,
    })
}

pub fn parse_stim_stop(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_STIM_STOP)?;
    meta.record(RecordKind::StimStop {
        channel_id: i16_at(event, 14)?,
    })
}

pub fn parse_motor_set_pos(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_MOTOR_SET_POS)?;
    meta.record(RecordKind::MotorSetPos {
        motor_id: i16_at(event, 14)?,
        position: i32_at(event, 16)?,
    })
}

pub fn parse_motor_set_speed(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_MOTOR_SET_SPEED)?;
    meta.record(RecordKind::MotorSetSpeed {
        motor_id: i16_at(event, 14)?,
        speed: i32_at(event, 16)?,
    })
}

pub fn parse_motor_config(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_MOTOR_CONFIG)?;
    let [position, zero_position, target_position, start_position, speed, range] =
        i32_array_at::<6>(event, 16)?;
    meta.record(RecordKind::MotorConfig {
        motor_id: i16_at(event, 14)?,
        position,
        zero_position,
        target_position,
        start_position,
        speed,
        range,
    })
}

pub fn parse_channel_change(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_WIRELESSMAP_CHANNEL_CHANGE)?;
    let [channel_id, level, direction, gain] = i16_array_at::<4>(event, 14)?;
    meta.record(RecordKind::ChannelChange {
        channel_id,
        level,
        direction,
        gain,
        enabled: u8_at(event, 22)? == 1,
    })
}

pub fn parse_filter_params(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_FILTER_PARAMS)?;
    let [channel_id, filter_type] = i16_array_at::<2>(event, 20)?;
    meta.record(RecordKind::FilterParams {
        down_sample_factor: i16_at(event, 14)?,
        filter_params: i32_at(event, 16)?,
        channel_id,
        filter_type,
        coefficients: i16_array_at::<20>(event, 24)?,
        n_coefficients: i16_at(event, 64)?,
    })
}

pub fn parse_impedance_values(event: &[u8]) -> Option<StreamRecord> {
    let meta = command(event, CMD_MGPLUS_IMP_VALUES)?;
    meta.record(RecordKind::ImpedanceValues {
        channel_mask: i16_at(event, 14)?,
        impedances: i32_array_at::<16>(event, 16)?,
        channel_group_id: i16_at(event, 80)?,
    })
}

pub fn parse_stim_status(event: &[u8]) -> Option<StreamRecord> {
    let meta = classify(event, CLASS_STATUS, STATUS_STIM_STATUS)?;
    meta.record(RecordKind::StimStatus {
        channel_id: i16_at(event, 14)?,
        frequency_deviation: i16_at(event, 16)?,
        stim_status: i16_at(event, 18)?,
        measured_amplitudes: i16_array_at::<2>(event, 20)?,
    })
}
