// src/commands/registry.rs
use crate::commands::parsers;
use crate::commands::record::StreamRecord;

/// A stateless event parser: byte slice in, optional record out.
pub type CommandParser = fn(&[u8]) -> Option<StreamRecord>;

/// Ordered, open set of command/status parsers.
///
/// Dispatch is broadcast, not routed: every registered parser is offered
/// every event block, and only full discriminator-chain matches produce a
/// record. This is a deliberate contract — adding a new command type is
/// purely additive and cannot disturb existing parsers.
#[derive(Debug, Clone)]
pub struct CommandParserRegistry {
    parsers: Vec<CommandParser>,
}

impl CommandParserRegistry {
    /// An empty registry; events will produce no records.
    pub fn empty() -> Self {
        CommandParserRegistry {
            parsers: Vec::new(),
        }
    }

    /// A registry holding every parser this crate defines.
    pub fn with_defaults() -> Self {
        CommandParserRegistry {
            parsers: Self::default_parsers().to_vec(),
        }
    }

    /// The built-in parser set, in registration order.
    pub fn default_parsers() -> &'static [CommandParser] {
        &[
            parsers::parse_channel_down_sample,
            parsers::parse_port_as_strobe,
            parsers::parse_channel_state,
            parsers::parse_text_message,
            parsers::parse_templ_match_templ_change,
            parsers::parse_templ_match_threshold,
            parsers::parse_templ_match_spikes_selector,
            parsers::parse_traj_settings,
            parsers::parse_module_stimulus,
            parsers::parse_module_electrode_param,
            parsers::parse_stim_start,
            parsers::parse_stim_stop,
            parsers::parse_motor_set_pos,
            parsers::parse_motor_set_speed,
            parsers::parse_motor_config,
            parsers::parse_channel_change,
            parsers::parse_filter_params,
            parsers::parse_impedance_values,
            parsers::parse_stim_status,
        ]
    }

    /// Append a parser to the broadcast set.
    pub fn register(&mut self, parser: CommandParser) {
        self.parsers.push(parser);
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Offer one event block to every parser, appending each match to `out`
    /// in registration order.
    pub fn dispatch(&self, event: &[u8], out: &mut Vec<StreamRecord>) {
        for parser in &self.parsers {
            if let Some(record) = parser(event) {
                out.push(record);
            }
        }
    }
}

impl Default for CommandParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
