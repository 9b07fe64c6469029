//! Raw MIDI byte decoding.

/// Channel voice message with 7-bit data already masked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelVoice {
    NoteOff { note: u8 },
    NoteOn { note: u8, velocity: u8 },
    NoteAftertouch { note: u8, pressure: u8 },
    ControlChange { controller: u8, value: u8 },
    ProgramChange { program: u8 },
    ChannelAftertouch { pressure: u8 },
    /// 14-bit value, 0x2000 is center.
    PitchBend { value: u16 },
}

impl ChannelVoice {
    /// Minimum message length, status byte included, for a status nibble.
    /// `None` for nibbles that are not channel voice messages.
    #[inline]
    pub fn min_len(status_nibble: u8) -> Option<usize> {
        match status_nibble {
            0x8 | 0x9 | 0xA | 0xB | 0xE => Some(3),
            0xC | 0xD => Some(2),
            _ => None,
        }
    }
}

/// One decoded MIDI message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiMessage<'a> {
    Channel { channel: u8, message: ChannelVoice },
    /// Complete SysEx message, `0xF0` through `0xF7`.
    SysEx(&'a [u8]),
}

impl<'a> MidiMessage<'a> {
    /// Decodes one message.
    ///
    /// Returns `None` for empty input, messages shorter than their status
    /// requires, data bytes without a status, and system messages other than
    /// SysEx. A note-on with velocity zero decodes as a note-off.
    pub fn decode(bytes: &'a [u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status == 0xF0 {
            return Some(MidiMessage::SysEx(bytes));
        }

        let nibble = status >> 4;
        let min_len = ChannelVoice::min_len(nibble)?;
        if bytes.len() < min_len {
            return None;
        }

        let channel = status & 0x0F;
        let d1 = data[0] & 0x7F;
        let d2 = data.get(1).map_or(0, |b| b & 0x7F);

        let message = match nibble {
            0x8 => ChannelVoice::NoteOff { note: d1 },
            0x9 if d2 == 0 => ChannelVoice::NoteOff { note: d1 },
            0x9 => ChannelVoice::NoteOn {
                note: d1,
                velocity: d2,
            },
            0xA => ChannelVoice::NoteAftertouch {
                note: d1,
                pressure: d2,
            },
            0xB => ChannelVoice::ControlChange {
                controller: d1,
                value: d2,
            },
            0xC => ChannelVoice::ProgramChange { program: d1 },
            0xD => ChannelVoice::ChannelAftertouch { pressure: d1 },
            0xE => ChannelVoice::PitchBend {
                value: d1 as u16 | (d2 as u16) << 7,
            },
            _ => return None,
        };

        Some(MidiMessage::Channel { channel, message })
    }
}
