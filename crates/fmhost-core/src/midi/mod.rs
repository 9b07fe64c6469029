//! MIDI message decoding and per-channel state.

mod channels;
mod message;
pub mod sysex;

pub use channels::{ChannelMap, Program, MIDI_CHANNELS};
pub use message::{ChannelVoice, MidiMessage};

pub const CC_BANK_MSB: u8 = 0;
pub const CC_BANK_LSB: u8 = 32;
pub const CC_ALL_SOUND_OFF: u8 = 120;
pub const CC_ALL_NOTES_OFF: u8 = 123;
