//! Synthesis engine contract.
//!
//! Every engine family implements [`SynthEngine`]. The player is generic over
//! it, so the realtime calls (`generate`, the `rt_*` note events) are static
//! dispatch. Families are combined into a closed enum by the registry in
//! `fmhost-synth`, never boxed behind a trait object.

use crate::Result;
use std::path::Path;

/// Uniform operation set over one synthesis engine family.
///
/// `rt_*` methods and [`generate`](SynthEngine::generate) run on realtime
/// threads: bounded time, no allocation, no blocking. The remaining mutators
/// are only called from the control context.
pub trait SynthEngine: Send + 'static {
    /// Creates an engine at `sample_rate` with its default bank, emulator 0
    /// and one chip.
    fn create(sample_rate: u32) -> Result<Self>
    where
        Self: Sized;

    fn name(&self) -> &'static str;
    fn version(&self) -> &'static str;
    fn sample_rate(&self) -> u32;

    fn emulator_name(&self) -> &str;
    fn chip_count(&self) -> u32;

    /// Fails with [`Error::Config`](crate::Error::Config) when `count` is out of
    /// the family's range.
    fn set_chip_count(&mut self, count: u32) -> Result<()>;

    /// Fails with [`Error::Config`](crate::Error::Config) when `index` is past
    /// the last emulator of the family.
    fn set_emulator(&mut self, index: usize) -> Result<()>;

    /// Replaces the instrument bank. On failure the previous bank stays active.
    fn load_bank_file(&mut self, path: &Path) -> Result<()>;

    /// Silences every voice immediately.
    fn panic(&mut self);

    fn rt_note_on(&mut self, channel: u8, note: u8, velocity: u8);
    fn rt_note_off(&mut self, channel: u8, note: u8);
    fn rt_note_aftertouch(&mut self, channel: u8, note: u8, pressure: u8);
    fn rt_channel_aftertouch(&mut self, channel: u8, pressure: u8);
    fn rt_controller_change(&mut self, channel: u8, controller: u8, value: u8);
    fn rt_program_change(&mut self, channel: u8, program: u8);
    /// `value` is the 14-bit bend, 0x2000 is center.
    fn rt_pitch_bend(&mut self, channel: u8, value: u16);

    /// Renders `frames` stereo pairs. Sample `i` goes to `left[i * stride]`
    /// and `right[i * stride]`; other slots are left untouched.
    fn generate(&mut self, frames: usize, left: &mut [f32], right: &mut [f32], stride: usize);
}

/// Lists the emulators of engine family `E`.
///
/// Tries a throwaway instance with indices 0, 1, 2, ... until the engine
/// rejects one. Assumes the valid indices are contiguous from zero; a family
/// with gaps is reported up to its first gap.
pub fn enumerate_emulators<E: SynthEngine>(sample_rate: u32) -> Result<Vec<String>> {
    let mut scratch = E::create(sample_rate)?;
    let mut names = Vec::new();
    while scratch.set_emulator(names.len()).is_ok() {
        names.push(scratch.emulator_name().to_string());
    }
    Ok(names)
}

/// Introspection snapshot of the live engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInfo {
    pub name: String,
    pub version: String,
    pub emulator: usize,
    pub emulator_name: String,
    pub chip_count: u32,
}

impl EngineInfo {
    pub fn capture<E: SynthEngine>(engine: &E, emulator: usize) -> Self {
        Self {
            name: engine.name().to_string(),
            version: engine.version().to_string(),
            emulator,
            emulator_name: engine.emulator_name().to_string(),
            chip_count: engine.chip_count(),
        }
    }
}

/// Writes `frames` zero pairs at `stride`.
#[inline]
pub fn fill_silence(frames: usize, left: &mut [f32], right: &mut [f32], stride: usize) {
    for i in 0..frames {
        left[i * stride] = 0.0;
        right[i * stride] = 0.0;
    }
}
