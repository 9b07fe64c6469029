//! Silent engine.
//!
//! Accepts every event and renders zeros. Used for headless runs and to
//! measure the cost of the pipeline itself.

use fmhost_core::{fill_silence, Error, Result, SynthEngine};
use std::path::{Path, PathBuf};

pub const NULL_MAX_CHIPS: u32 = 100;

pub struct NullEngine {
    sample_rate: u32,
    chips: u32,
    bank: Option<PathBuf>,
}

impl NullEngine {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            chips: 1,
            bank: None,
        }
    }

    /// Last bank file accepted, `None` while on the default.
    pub fn bank(&self) -> Option<&Path> {
        self.bank.as_deref()
    }
}

impl SynthEngine for NullEngine {
    fn create(sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::EngineInit("sample rate must be positive".into()));
        }
        Ok(Self::new(sample_rate))
    }

    fn name(&self) -> &'static str {
        "Null"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn emulator_name(&self) -> &str {
        "Null"
    }

    fn chip_count(&self) -> u32 {
        self.chips
    }

    fn set_chip_count(&mut self, count: u32) -> Result<()> {
        if !(1..=NULL_MAX_CHIPS).contains(&count) {
            return Err(Error::Config(format!(
                "chip count {} out of range (1-{})",
                count, NULL_MAX_CHIPS
            )));
        }
        self.chips = count;
        Ok(())
    }

    fn set_emulator(&mut self, index: usize) -> Result<()> {
        if index != 0 {
            return Err(Error::Config(format!("no emulator {}", index)));
        }
        Ok(())
    }

    fn load_bank_file(&mut self, path: &Path) -> Result<()> {
        let metadata = std::fs::metadata(path).map_err(|e| Error::bank_load(path, e))?;
        if !metadata.is_file() {
            return Err(Error::bank_load(path, "not a regular file"));
        }
        self.bank = Some(path.to_path_buf());
        Ok(())
    }

    fn panic(&mut self) {}

    fn rt_note_on(&mut self, _channel: u8, _note: u8, _velocity: u8) {}
    fn rt_note_off(&mut self, _channel: u8, _note: u8) {}
    fn rt_note_aftertouch(&mut self, _channel: u8, _note: u8, _pressure: u8) {}
    fn rt_channel_aftertouch(&mut self, _channel: u8, _pressure: u8) {}
    fn rt_controller_change(&mut self, _channel: u8, _controller: u8, _value: u8) {}
    fn rt_program_change(&mut self, _channel: u8, _program: u8) {}
    fn rt_pitch_bend(&mut self, _channel: u8, _value: u16) {}

    fn generate(&mut self, frames: usize, left: &mut [f32], right: &mut [f32], stride: usize) {
        fill_silence(frames, left, right, stride);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_range() {
        let mut engine = NullEngine::new(44100);
        assert!(engine.set_chip_count(0).is_err());
        assert!(engine.set_chip_count(NULL_MAX_CHIPS + 1).is_err());
        assert_eq!(engine.chip_count(), 1);
        engine.set_chip_count(NULL_MAX_CHIPS).unwrap();
        assert_eq!(engine.chip_count(), NULL_MAX_CHIPS);
    }

    #[test]
    fn test_single_emulator() {
        let mut engine = NullEngine::new(44100);
        assert!(engine.set_emulator(0).is_ok());
        assert!(matches!(engine.set_emulator(1), Err(Error::Config(_))));
    }

    #[test]
    fn test_bank_must_be_a_file() {
        let mut engine = NullEngine::new(44100);
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            engine.load_bank_file(dir.path()),
            Err(Error::BankLoad { .. })
        ));
        assert!(engine.load_bank_file(&dir.path().join("missing")).is_err());
        assert_eq!(engine.bank(), None);

        let file = dir.path().join("bank.wopl");
        std::fs::write(&file, b"WOPL").unwrap();
        engine.load_bank_file(&file).unwrap();
        assert_eq!(engine.bank(), Some(file.as_path()));
    }

    #[test]
    fn test_renders_silence() {
        let mut engine = NullEngine::new(44100);
        engine.rt_note_on(0, 60, 127);
        let mut left = [1.0f32; 16];
        let mut right = [1.0f32; 16];
        engine.generate(16, &mut left, &mut right, 1);
        assert!(left.iter().chain(right.iter()).all(|s| *s == 0.0));
    }
}
