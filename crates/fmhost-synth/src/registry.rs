//! Engine registry: selector, lookups and the closed set of engines.

use crate::null::NullEngine;
#[cfg(feature = "soundfont")]
use crate::soundfont::SoundFontEngine;
use fmhost_core::{enumerate_emulators, Error, Result, SynthEngine};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Engine family, fixed for the life of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    #[cfg(feature = "soundfont")]
    SoundFont,
    Null,
}

impl EngineKind {
    /// Every family compiled in, in index order.
    pub const ALL: &'static [EngineKind] = &[
        #[cfg(feature = "soundfont")]
        EngineKind::SoundFont,
        EngineKind::Null,
    ];

    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "soundfont")]
            EngineKind::SoundFont => "soundfont",
            EngineKind::Null => "null",
        }
    }

    /// Case-insensitive lookup by [`name`](Self::name).
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownEngine(name.to_string()))
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|kind| *kind == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Version of the library behind the family.
    pub fn version(self) -> &'static str {
        match self {
            #[cfg(feature = "soundfont")]
            EngineKind::SoundFont => "1.3",
            EngineKind::Null => env!("CARGO_PKG_VERSION"),
        }
    }

    /// Emulator names of this family, found on a throwaway instance.
    pub fn enumerate_emulators(self, sample_rate: u32) -> Result<Vec<String>> {
        match self {
            #[cfg(feature = "soundfont")]
            EngineKind::SoundFont => enumerate_emulators::<SoundFontEngine>(sample_rate),
            EngineKind::Null => enumerate_emulators::<NullEngine>(sample_rate),
        }
    }

    /// Index of the emulator called `name` (case-insensitive).
    pub fn emulator_index(self, sample_rate: u32, name: &str) -> Result<usize> {
        self.enumerate_emulators(sample_rate)?
            .iter()
            .position(|emulator| emulator.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                Error::Config(format!("{} has no emulator named '{}'", self, name))
            })
    }

    pub fn create(self, sample_rate: u32) -> Result<AnyEngine> {
        Ok(match self {
            #[cfg(feature = "soundfont")]
            EngineKind::SoundFont => AnyEngine::SoundFont(SoundFontEngine::create(sample_rate)?),
            EngineKind::Null => AnyEngine::Null(NullEngine::create(sample_rate)?),
        })
    }
}

impl Default for EngineKind {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// One engine of any compiled-in family.
pub enum AnyEngine {
    #[cfg(feature = "soundfont")]
    SoundFont(SoundFontEngine),
    Null(NullEngine),
}

impl AnyEngine {
    pub fn kind(&self) -> EngineKind {
        match self {
            #[cfg(feature = "soundfont")]
            AnyEngine::SoundFont(_) => EngineKind::SoundFont,
            AnyEngine::Null(_) => EngineKind::Null,
        }
    }
}

impl SynthEngine for AnyEngine {
    /// Creates an engine of the default family.
    fn create(sample_rate: u32) -> Result<Self> {
        EngineKind::default().create(sample_rate)
    }

    fn name(&self) -> &'static str {
        dispatch_engine!(self, engine => engine.name())
    }

    fn version(&self) -> &'static str {
        dispatch_engine!(self, engine => engine.version())
    }

    fn sample_rate(&self) -> u32 {
        dispatch_engine!(self, engine => engine.sample_rate())
    }

    fn emulator_name(&self) -> &str {
        dispatch_engine!(self, engine => engine.emulator_name())
    }

    fn chip_count(&self) -> u32 {
        dispatch_engine!(self, engine => engine.chip_count())
    }

    fn set_chip_count(&mut self, count: u32) -> Result<()> {
        dispatch_engine!(self, engine => engine.set_chip_count(count))
    }

    fn set_emulator(&mut self, index: usize) -> Result<()> {
        dispatch_engine!(self, engine => engine.set_emulator(index))
    }

    fn load_bank_file(&mut self, path: &Path) -> Result<()> {
        dispatch_engine!(self, engine => engine.load_bank_file(path))
    }

    fn panic(&mut self) {
        dispatch_engine!(self, engine => engine.panic())
    }

    #[inline]
    fn rt_note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        dispatch_engine!(self, engine => engine.rt_note_on(channel, note, velocity))
    }

    #[inline]
    fn rt_note_off(&mut self, channel: u8, note: u8) {
        dispatch_engine!(self, engine => engine.rt_note_off(channel, note))
    }

    #[inline]
    fn rt_note_aftertouch(&mut self, channel: u8, note: u8, pressure: u8) {
        dispatch_engine!(self, engine => engine.rt_note_aftertouch(channel, note, pressure))
    }

    #[inline]
    fn rt_channel_aftertouch(&mut self, channel: u8, pressure: u8) {
        dispatch_engine!(self, engine => engine.rt_channel_aftertouch(channel, pressure))
    }

    #[inline]
    fn rt_controller_change(&mut self, channel: u8, controller: u8, value: u8) {
        dispatch_engine!(self, engine => engine.rt_controller_change(channel, controller, value))
    }

    #[inline]
    fn rt_program_change(&mut self, channel: u8, program: u8) {
        dispatch_engine!(self, engine => engine.rt_program_change(channel, program))
    }

    #[inline]
    fn rt_pitch_bend(&mut self, channel: u8, value: u16) {
        dispatch_engine!(self, engine => engine.rt_pitch_bend(channel, value))
    }

    #[inline]
    fn generate(&mut self, frames: usize, left: &mut [f32], right: &mut [f32], stride: usize) {
        dispatch_engine!(self, engine => engine.generate(frames, left, right, stride))
    }
}
