//! Builder for configuring and constructing an `FmHost`.

use crate::{FmHost, Result};
use fmhost_core::config::DEFAULT_SAMPLE_RATE;
use fmhost_core::{Player, PlayerConfig};
use fmhost_synth::EngineKind;
use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "audio-io")]
use fmhost_core::AudioOutput;

/// Startup selection for an [`FmHost`].
///
/// The sample rate comes from the audio output device. Use
/// [`headless`](Self::headless) to skip the device entirely and drive the
/// pipeline through [`FmHost::audio_callback`].
///
/// # Example
///
/// ```ignore
/// use fmhost::prelude::*;
///
/// let host = FmHost::builder()
///     .engine(EngineKind::Null)
///     .chips(8)
///     .headless(48000)
///     .build()?;
/// ```
pub struct FmHostBuilder {
    kind: EngineKind,
    config: PlayerConfig,
    headless: Option<u32>,

    #[cfg(feature = "audio-io")]
    output_device: Option<usize>,

    #[cfg(feature = "midi-io")]
    midi_port: Option<String>,
}

impl Default for FmHostBuilder {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            config: PlayerConfig::default(),
            headless: None,

            #[cfg(feature = "audio-io")]
            output_device: None,

            #[cfg(feature = "midi-io")]
            midi_port: None,
        }
    }
}

impl FmHostBuilder {
    pub fn engine(mut self, kind: EngineKind) -> Self {
        self.kind = kind;
        self
    }

    /// Default: 2
    pub fn chips(mut self, count: u32) -> Self {
        self.config.chip_count = count;
        self
    }

    /// Default: the engine's built-in bank
    pub fn bank(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.bank = Some(path.into());
        self
    }

    /// Default: 0
    pub fn emulator(mut self, index: usize) -> Self {
        self.config.emulator = index;
        self
    }

    /// Output gain in percent. Default: 100
    pub fn volume(mut self, percent: u32) -> Self {
        self.config.volume = percent;
        self
    }

    /// SysEx device id to answer to. Default: 0x10
    pub fn sysex_device_id(mut self, id: u8) -> Self {
        self.config.sysex_device_id = id;
        self
    }

    /// Run without an audio device at `sample_rate`.
    pub fn headless(mut self, sample_rate: u32) -> Self {
        self.headless = Some(sample_rate);
        self
    }

    #[cfg(feature = "audio-io")]
    pub fn output_device(mut self, index: usize) -> Self {
        self.output_device = Some(index);
        self
    }

    /// Connect the first MIDI input whose name contains `pattern`; an empty
    /// pattern takes the first port. Ignored when headless.
    #[cfg(feature = "midi-io")]
    pub fn midi_port(mut self, pattern: impl Into<String>) -> Self {
        self.midi_port = Some(pattern.into());
        self
    }

    pub fn build(self) -> Result<FmHost> {
        // Open the device first: its rate decides the engine's.
        #[cfg(feature = "audio-io")]
        let mut output = match self.headless {
            Some(_) => None,
            None => Some(AudioOutput::new(self.output_device)?),
        };

        #[cfg(feature = "audio-io")]
        let sample_rate = match (&output, self.headless) {
            (Some(output), _) => output.sample_rate(),
            (None, rate) => rate.unwrap_or(DEFAULT_SAMPLE_RATE),
        };
        #[cfg(not(feature = "audio-io"))]
        let sample_rate = self.headless.unwrap_or(DEFAULT_SAMPLE_RATE);

        let config = PlayerConfig {
            sample_rate,
            ..self.config
        };
        config.validate()?;

        let engine = self.kind.create(sample_rate)?;
        let player = Arc::new(Player::new(engine, &config)?);

        #[cfg(feature = "audio-io")]
        if let Some(output) = output.as_mut() {
            output.start(player.audio_callback())?;
        }

        #[cfg(feature = "midi-io")]
        let midi = match (&self.midi_port, self.headless) {
            (Some(pattern), None) => Some(crate::midi_input::connect(
                Arc::clone(&player),
                pattern,
            )?),
            _ => None,
        };

        Ok(FmHost::from_parts(
            player,
            self.kind,
            #[cfg(feature = "audio-io")]
            output,
            #[cfg(feature = "midi-io")]
            midi,
        ))
    }
}
