// src/commands/codes.rs
//! Wire discriminator constants for event blocks.
//!
//! Every event block carries a class byte at offset 10 and a 16-bit package
//! type at offset 12; multiplexed classes (generic message, module params)
//! add a further 16-bit sub-type at offset 14.

/// Class byte values at offset 10.
pub const CLASS_COMMAND: u8 = 77;
pub const CLASS_STATUS: u8 = 83;

/// Command package types at offset 12.
pub const CMD_GENERIC_MESSAGE: i16 = 7;
pub const CMD_MODULE_PARAMS: i16 = 8;
pub const CMD_STIM_START: i16 = 10;
pub const CMD_STIM_STOP: i16 = 11;
pub const CMD_MOTOR_SET_POS: i16 = 106;
pub const CMD_MOTOR_SET_SPEED: i16 = 110;
pub const CMD_MOTOR_CONFIG: i16 = 115;
pub const CMD_WIRELESSMAP_CHANNEL_CHANGE: i16 = 200;
pub const CMD_TEMPL_MATCH_TEMPL_CHANGE: i16 = 230;
pub const CMD_TEMPL_MATCH_THRESHOLD: i16 = 231;
pub const CMD_TEMPL_MATCH_SPIKES_SELECTOR: i16 = 232;
pub const CMD_MGPLUS_IMP_VALUES: i16 = 411;
pub const CMD_TRAJ_SETTINGS: i16 = 522;
pub const CMD_FILTER_PARAMS: i16 = 867;

/// Status package types at offset 12.
pub const STATUS_STIM_STATUS: i16 = 4;

/// Generic-message sub-types at offset 14.
pub const GENMES_HEAD_STAGE_STATUSES: i16 = 6;
pub const GENMES_TEXT_MESSAGE: i16 = 20;
pub const GENMES_PORT_AS_STROBE: i16 = 21;
pub const GENMES_CHANNEL_STATE: i16 = 25;
pub const GENMES_CHANNEL_DOWN_SAMPLE: i16 = 26;
pub const GENMES_REFERENCE_CHANGED: i16 = 34;

/// Module-params sub-types at offset 14.
pub const MODULE_STIMULUS: i16 = 1;
pub const MODULE_ANALOG_OUTPUT_PARAM: i16 = 3;
pub const MODULE_ELECTRODE_PARAM: i16 = 5;
