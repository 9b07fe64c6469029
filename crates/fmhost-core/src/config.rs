//! Player configuration.

use crate::midi::sysex::DEFAULT_DEVICE_ID;
use crate::{Error, Result};
use std::path::PathBuf;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_CHIP_COUNT: u32 = 2;
/// DC-blocking filter cutoff in Hz.
pub const DEFAULT_DC_CUTOFF_HZ: f64 = 5.0;
/// Level monitor release time in seconds.
pub const DEFAULT_LEVEL_RELEASE_SECS: f64 = 0.1;
/// Output gain in percent.
pub const DEFAULT_VOLUME: u32 = 100;
pub const MAX_VOLUME: u32 = 400;

/// Startup configuration of a [`Player`](crate::Player).
///
/// Supplied once at process start; the chip count, emulator and bank can
/// later be changed through the control surface.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub sample_rate: u32,
    pub chip_count: u32,
    /// `None` keeps the engine's built-in default bank.
    pub bank: Option<PathBuf>,
    pub emulator: usize,
    pub dc_cutoff_hz: f64,
    pub level_release_secs: f64,
    pub volume: u32,
    /// SysEx device id answered to, besides broadcast.
    pub sysex_device_id: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            chip_count: DEFAULT_CHIP_COUNT,
            bank: None,
            emulator: 0,
            dc_cutoff_hz: DEFAULT_DC_CUTOFF_HZ,
            level_release_secs: DEFAULT_LEVEL_RELEASE_SECS,
            volume: DEFAULT_VOLUME,
            sysex_device_id: DEFAULT_DEVICE_ID,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(8000..=384000).contains(&self.sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        if self.chip_count < 1 {
            return Err(Error::InvalidConfig(
                "chip_count must be at least 1".to_string(),
            ));
        }
        let nyquist = self.sample_rate as f64 / 2.0;
        if !(self.dc_cutoff_hz > 0.0 && self.dc_cutoff_hz < nyquist) {
            return Err(Error::InvalidConfig(format!(
                "dc_cutoff_hz {} out of range (0-{} Hz)",
                self.dc_cutoff_hz, nyquist
            )));
        }
        if !(self.level_release_secs > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "level_release_secs {} must be positive",
                self.level_release_secs
            )));
        }
        if self.volume > MAX_VOLUME {
            return Err(Error::InvalidConfig(format!(
                "volume {}% out of range (0-{}%)",
                self.volume, MAX_VOLUME
            )));
        }
        if self.sysex_device_id > 0x7F {
            return Err(Error::InvalidConfig(format!(
                "sysex_device_id {:#04X} is not a 7-bit value",
                self.sysex_device_id
            )));
        }
        Ok(())
    }

    /// DC filter cutoff as a fraction of the sample rate.
    pub fn normalized_dc_cutoff(&self) -> f64 {
        self.dc_cutoff_hz / self.sample_rate as f64
    }

    /// Level monitor release time in samples.
    pub fn level_release_samples(&self) -> f64 {
        self.level_release_secs * self.sample_rate as f64
    }
}
