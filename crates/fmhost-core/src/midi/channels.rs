//! Per-channel program map and note activity.
//!
//! Written by the realtime dispatcher while it holds the engine lock, so there
//! is a single writer at a time. Readers (the presentation layer) load the
//! atomics without locking.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

pub const MIDI_CHANNELS: usize = 16;

/// Last program selection received on a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Program {
    pub gm: u8,
    pub bank_msb: u8,
    pub bank_lsb: u8,
}

#[derive(Default)]
struct ChannelState {
    gm: AtomicU8,
    bank_msb: AtomicU8,
    bank_lsb: AtomicU8,
    /// Last note played plus one, zero when none.
    last_note_p1: AtomicU8,
    /// Sounding notes, bit `n % 64` of word `n / 64`.
    active: [AtomicU64; 2],
}

/// Program map and note activity for the 16 MIDI channels.
#[derive(Default)]
pub struct ChannelMap {
    channels: [ChannelState; MIDI_CHANNELS],
}

impl ChannelMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(&self, channel: u8) -> Program {
        let state = &self.channels[channel as usize & 0x0F];
        Program {
            gm: state.gm.load(Ordering::Relaxed),
            bank_msb: state.bank_msb.load(Ordering::Relaxed),
            bank_lsb: state.bank_lsb.load(Ordering::Relaxed),
        }
    }

    pub fn programs(&self) -> [Program; MIDI_CHANNELS] {
        let mut programs = [Program::default(); MIDI_CHANNELS];
        for (channel, program) in programs.iter_mut().enumerate() {
            *program = self.program(channel as u8);
        }
        programs
    }

    pub fn note_count(&self, channel: u8) -> u32 {
        let state = &self.channels[channel as usize & 0x0F];
        state
            .active
            .iter()
            .map(|word| word.load(Ordering::Relaxed).count_ones())
            .sum()
    }

    pub fn is_note_active(&self, channel: u8, note: u8) -> bool {
        let (word, bit) = Self::note_bit(note);
        let state = &self.channels[channel as usize & 0x0F];
        state.active[word].load(Ordering::Relaxed) & bit != 0
    }

    pub fn last_note(&self, channel: u8) -> Option<u8> {
        let state = &self.channels[channel as usize & 0x0F];
        state.last_note_p1.load(Ordering::Relaxed).checked_sub(1)
    }

    pub(crate) fn set_program(&self, channel: u8, gm: u8) {
        self.state(channel).gm.store(gm, Ordering::Relaxed);
    }

    pub(crate) fn set_bank_msb(&self, channel: u8, value: u8) {
        self.state(channel).bank_msb.store(value, Ordering::Relaxed);
    }

    pub(crate) fn set_bank_lsb(&self, channel: u8, value: u8) {
        self.state(channel).bank_lsb.store(value, Ordering::Relaxed);
    }

    pub(crate) fn note_on(&self, channel: u8, note: u8) {
        let (word, bit) = Self::note_bit(note);
        let state = self.state(channel);
        state.active[word].fetch_or(bit, Ordering::Relaxed);
        state.last_note_p1.store((note & 0x7F) + 1, Ordering::Relaxed);
    }

    pub(crate) fn note_off(&self, channel: u8, note: u8) {
        let (word, bit) = Self::note_bit(note);
        self.state(channel).active[word].fetch_and(!bit, Ordering::Relaxed);
    }

    pub(crate) fn clear_notes(&self, channel: u8) {
        for word in &self.state(channel).active {
            word.store(0, Ordering::Relaxed);
        }
    }

    pub(crate) fn clear_all_notes(&self) {
        for channel in 0..MIDI_CHANNELS as u8 {
            self.clear_notes(channel);
        }
    }

    #[inline]
    fn state(&self, channel: u8) -> &ChannelState {
        &self.channels[channel as usize & 0x0F]
    }

    #[inline]
    fn note_bit(note: u8) -> (usize, u64) {
        let note = note & 0x7F;
        ((note / 64) as usize, 1u64 << (note % 64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_map_starts_zeroed() {
        let map = ChannelMap::new();
        assert!(map.programs().iter().all(|p| *p == Program::default()));
    }

    #[test]
    fn test_program_and_bank_recorded_per_channel() {
        let map = ChannelMap::new();
        map.set_program(9, 42);
        map.set_bank_msb(9, 1);
        map.set_bank_lsb(9, 2);
        assert_eq!(
            map.program(9),
            Program {
                gm: 42,
                bank_msb: 1,
                bank_lsb: 2
            }
        );
        assert_eq!(map.program(8), Program::default());
    }

    #[test]
    fn test_note_tracking() {
        let map = ChannelMap::new();
        map.note_on(0, 60);
        map.note_on(0, 127);
        map.note_on(0, 60);
        assert_eq!(map.note_count(0), 2);
        assert!(map.is_note_active(0, 127));
        assert_eq!(map.last_note(0), Some(60));

        map.note_off(0, 60);
        assert_eq!(map.note_count(0), 1);
        assert!(!map.is_note_active(0, 60));
        // Releasing a note that is not sounding is harmless.
        map.note_off(0, 61);
        assert_eq!(map.note_count(0), 1);
    }

    #[test]
    fn test_clear_notes() {
        let map = ChannelMap::new();
        map.note_on(1, 10);
        map.note_on(2, 20);
        map.clear_notes(1);
        assert_eq!(map.note_count(1), 0);
        assert_eq!(map.note_count(2), 1);
        map.clear_all_notes();
        assert_eq!(map.note_count(2), 0);
        assert_eq!(map.last_note(2), Some(20));
    }

    #[test]
    fn test_no_last_note_initially() {
        assert_eq!(ChannelMap::new().last_note(5), None);
    }
}
