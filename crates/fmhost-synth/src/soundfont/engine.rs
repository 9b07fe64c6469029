//! SoundFont engine wrapping RustySynth.

use fmhost_core::{fill_silence, Error, Result, SynthEngine};
use rustysynth::{SoundFont, Synthesizer, SynthesizerSettings};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// Voices each chip contributes to the synthesizer's polyphony.
pub const VOICES_PER_CHIP: u32 = 18;

const MIN_POLYPHONY: u32 = 8;
const MAX_POLYPHONY: u32 = 256;

/// Largest chip count RustySynth's polyphony limit allows.
pub const SOUNDFONT_MAX_CHIPS: u32 = MAX_POLYPHONY / VOICES_PER_CHIP;

const EMULATORS: [&str; 2] = ["RustySynth", "RustySynth + reverb/chorus"];

const RUSTYSYNTH_VERSION: &str = "1.3";

/// Frames rendered per RustySynth call.
const RENDER_BLOCK: usize = 512;

/// Sample-based engine over a `.sf2` bank.
///
/// Chips map to polyphony, emulators select the effect chain. Until a bank
/// is loaded there is no synthesizer: events are ignored and output is
/// silent. Any change of chip count or emulator rebuilds the synthesizer
/// from the loaded bank.
pub struct SoundFontEngine {
    sample_rate: u32,
    emulator: usize,
    chips: u32,
    soundfont: Option<Arc<SoundFont>>,
    synthesizer: Option<Synthesizer>,
    left_buffer: Vec<f32>,
    right_buffer: Vec<f32>,
}

impl SoundFontEngine {
    /// Whether a bank is loaded and the engine can make sound.
    pub fn has_bank(&self) -> bool {
        self.synthesizer.is_some()
    }

    fn settings(&self, emulator: usize, chips: u32) -> SynthesizerSettings {
        let mut settings = SynthesizerSettings::new(self.sample_rate as i32);
        settings.maximum_polyphony = (chips * VOICES_PER_CHIP).max(MIN_POLYPHONY) as usize;
        settings.enable_reverb_and_chorus = emulator == 1;
        settings
    }

    fn build(&self, soundfont: &Arc<SoundFont>, emulator: usize, chips: u32) -> Result<Synthesizer> {
        Synthesizer::new(soundfont, &self.settings(emulator, chips))
            .map_err(|e| Error::Config(format!("Failed to create synthesizer: {}", e)))
    }

    /// Rebuilds the synthesizer for a new configuration. The old one stays
    /// if the build fails.
    fn rebuild(&mut self, emulator: usize, chips: u32) -> Result<()> {
        if let Some(soundfont) = &self.soundfont {
            let synthesizer = self.build(soundfont, emulator, chips)?;
            self.synthesizer = Some(synthesizer);
        }
        Ok(())
    }

    #[inline]
    fn send(&mut self, channel: u8, command: i32, data1: u8, data2: u8) {
        if let Some(synthesizer) = &mut self.synthesizer {
            synthesizer.process_midi_message(channel as i32, command, data1 as i32, data2 as i32);
        }
    }
}

impl SynthEngine for SoundFontEngine {
    fn create(sample_rate: u32) -> Result<Self> {
        if !(16000..=192000).contains(&sample_rate) {
            return Err(Error::EngineInit(format!(
                "RustySynth does not support {} Hz (16000-192000 Hz)",
                sample_rate
            )));
        }
        Ok(Self {
            sample_rate,
            emulator: 0,
            chips: 1,
            soundfont: None,
            synthesizer: None,
            left_buffer: vec![0.0; RENDER_BLOCK],
            right_buffer: vec![0.0; RENDER_BLOCK],
        })
    }

    fn name(&self) -> &'static str {
        "SoundFont"
    }

    fn version(&self) -> &'static str {
        RUSTYSYNTH_VERSION
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn emulator_name(&self) -> &str {
        EMULATORS[self.emulator]
    }

    fn chip_count(&self) -> u32 {
        self.chips
    }

    fn set_chip_count(&mut self, count: u32) -> Result<()> {
        if !(1..=SOUNDFONT_MAX_CHIPS).contains(&count) {
            return Err(Error::Config(format!(
                "chip count {} out of range (1-{})",
                count, SOUNDFONT_MAX_CHIPS
            )));
        }
        self.rebuild(self.emulator, count)?;
        self.chips = count;
        Ok(())
    }

    fn set_emulator(&mut self, index: usize) -> Result<()> {
        if index >= EMULATORS.len() {
            return Err(Error::Config(format!("no emulator {}", index)));
        }
        self.rebuild(index, self.chips)?;
        self.emulator = index;
        Ok(())
    }

    fn load_bank_file(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| Error::bank_load(path, e))?;
        let mut reader = BufReader::new(file);
        let soundfont =
            Arc::new(SoundFont::new(&mut reader).map_err(|e| Error::bank_load(path, e))?);
        let synthesizer = self
            .build(&soundfont, self.emulator, self.chips)
            .map_err(|e| Error::bank_load(path, e))?;

        self.soundfont = Some(soundfont);
        self.synthesizer = Some(synthesizer);
        Ok(())
    }

    fn panic(&mut self) {
        if let Some(synthesizer) = &mut self.synthesizer {
            synthesizer.note_off_all(true);
        }
    }

    fn rt_note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        self.send(channel, 0x90, note, velocity);
    }

    fn rt_note_off(&mut self, channel: u8, note: u8) {
        self.send(channel, 0x80, note, 0);
    }

    fn rt_note_aftertouch(&mut self, channel: u8, note: u8, pressure: u8) {
        self.send(channel, 0xA0, note, pressure);
    }

    fn rt_channel_aftertouch(&mut self, channel: u8, pressure: u8) {
        self.send(channel, 0xD0, pressure, 0);
    }

    fn rt_controller_change(&mut self, channel: u8, controller: u8, value: u8) {
        self.send(channel, 0xB0, controller, value);
    }

    fn rt_program_change(&mut self, channel: u8, program: u8) {
        self.send(channel, 0xC0, program, 0);
    }

    fn rt_pitch_bend(&mut self, channel: u8, value: u16) {
        let lsb = (value & 0x7F) as u8;
        let msb = ((value >> 7) & 0x7F) as u8;
        self.send(channel, 0xE0, lsb, msb);
    }

    fn generate(&mut self, frames: usize, left: &mut [f32], right: &mut [f32], stride: usize) {
        let Some(synthesizer) = &mut self.synthesizer else {
            fill_silence(frames, left, right, stride);
            return;
        };

        let mut start = 0;
        while start < frames {
            let n = (frames - start).min(RENDER_BLOCK);
            let block_left = &mut self.left_buffer[..n];
            let block_right = &mut self.right_buffer[..n];
            synthesizer.render(block_left, block_right);

            for i in 0..n {
                let idx = (start + i) * stride;
                left[idx] = block_left[i];
                right[idx] = block_right[i];
            }
            start += n;
        }
    }
}
