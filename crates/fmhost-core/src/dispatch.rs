//! Realtime MIDI dispatch.

use crate::engine::SynthEngine;
use crate::midi::sysex::SysEx;
use crate::midi::{
    ChannelVoice, MidiMessage, CC_ALL_NOTES_OFF, CC_ALL_SOUND_OFF, CC_BANK_LSB, CC_BANK_MSB,
};
use crate::notify::Notification;
use crate::player::{Live, Player};

impl<E: SynthEngine> Player<E> {
    /// Forwards one raw MIDI message to the engine.
    ///
    /// Safe to call from a MIDI callback thread. Never blocks: if the engine
    /// is busy rendering or being reconfigured the message is dropped.
    /// Returns whether the message was acted on. Truncated messages, system
    /// messages other than SysEx, SysEx that is not recognized or not
    /// addressed to this player, and dropped messages return false. A
    /// recognized text insert counts as acted on even when the notification
    /// ring is full.
    pub fn play_midi(&self, bytes: &[u8]) -> bool {
        let Some(message) = MidiMessage::decode(bytes) else {
            return false;
        };
        let Some(mut live) = self.live.try_lock() else {
            return false;
        };

        match message {
            MidiMessage::Channel { channel, message } => {
                self.dispatch_channel(&mut live.engine, channel, message);
                true
            }
            MidiMessage::SysEx(msg) => self.dispatch_sysex(&mut live, msg),
        }
    }

    #[inline]
    fn dispatch_channel(&self, engine: &mut E, channel: u8, message: ChannelVoice) {
        match message {
            ChannelVoice::NoteOff { note } => {
                engine.rt_note_off(channel, note);
                self.channels.note_off(channel, note);
            }
            ChannelVoice::NoteOn { note, velocity } => {
                engine.rt_note_on(channel, note, velocity);
                self.channels.note_on(channel, note);
            }
            ChannelVoice::NoteAftertouch { note, pressure } => {
                engine.rt_note_aftertouch(channel, note, pressure);
            }
            ChannelVoice::ControlChange { controller, value } => {
                engine.rt_controller_change(channel, controller, value);
                match controller {
                    CC_BANK_MSB => self.channels.set_bank_msb(channel, value),
                    CC_BANK_LSB => self.channels.set_bank_lsb(channel, value),
                    CC_ALL_SOUND_OFF | CC_ALL_NOTES_OFF => self.channels.clear_notes(channel),
                    _ => {}
                }
            }
            ChannelVoice::ProgramChange { program } => {
                engine.rt_program_change(channel, program);
                self.channels.set_program(channel, program);
            }
            ChannelVoice::ChannelAftertouch { pressure } => {
                engine.rt_channel_aftertouch(channel, pressure);
            }
            ChannelVoice::PitchBend { value } => {
                engine.rt_pitch_bend(channel, value);
            }
        }
    }

    fn dispatch_sysex(&self, live: &mut Live<E>, msg: &[u8]) -> bool {
        match SysEx::parse(msg, self.device_id) {
            Some(SysEx::TextInsert(text)) => {
                // Full ring: the UI is not polling, drop it.
                live.notifications.send(Notification::text_insert(text));
                true
            }
            None => false,
        }
    }
}
