//! FmHost: one player wired to its audio output and MIDI input.

use crate::Result;
use fmhost_core::{
    AudioCallback, ChannelMap, EngineInfo, MonitorFeed, MonitorSnapshot, Notification, Player,
};
use fmhost_synth::{AnyEngine, EngineKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "audio-io")]
use fmhost_core::AudioOutput;

#[cfg(feature = "midi-io")]
use crate::midi_input::MidiInputHandle;

/// A running synthesizer host.
///
/// Owns the [`Player`] and, unless built headless, the audio output stream
/// and MIDI input connection driving it. Dropping the host stops both.
///
/// # Example
///
/// ```ignore
/// use fmhost::prelude::*;
///
/// let host = FmHost::builder()
///     .engine(EngineKind::SoundFont)
///     .bank("gm.sf2")
///     .chips(4)
///     .midi_port("")
///     .build()?;
///
/// host.switch_emulator(1)?;
/// let snapshot = host.monitor().snapshot();
/// ```
pub struct FmHost {
    player: Arc<Player<AnyEngine>>,
    kind: EngineKind,

    #[cfg(feature = "audio-io")]
    output: Option<AudioOutput>,

    #[cfg(feature = "midi-io")]
    midi: Option<MidiInputHandle>,
}

impl FmHost {
    pub fn builder() -> crate::FmHostBuilder {
        crate::FmHostBuilder::default()
    }

    pub(crate) fn from_parts(
        player: Arc<Player<AnyEngine>>,
        kind: EngineKind,
        #[cfg(feature = "audio-io")] output: Option<AudioOutput>,
        #[cfg(feature = "midi-io")] midi: Option<MidiInputHandle>,
    ) -> Self {
        Self {
            player,
            kind,
            #[cfg(feature = "audio-io")]
            output,
            #[cfg(feature = "midi-io")]
            midi,
        }
    }

    pub fn player(&self) -> &Arc<Player<AnyEngine>> {
        &self.player
    }

    pub fn kind(&self) -> EngineKind {
        self.kind
    }

    pub fn sample_rate(&self) -> u32 {
        self.player.sample_rate()
    }

    /// Whether an audio stream is playing. Always false when headless.
    pub fn is_running(&self) -> bool {
        #[cfg(feature = "audio-io")]
        {
            self.output.as_ref().is_some_and(|o| o.is_running())
        }
        #[cfg(not(feature = "audio-io"))]
        {
            false
        }
    }

    /// Name of the connected MIDI input port.
    #[cfg(feature = "midi-io")]
    pub fn midi_port_name(&self) -> Option<&str> {
        self.midi.as_ref().map(|m| m.port_name())
    }

    /// Audio pipeline for driving the player by hand, e.g. when headless.
    pub fn audio_callback(&self) -> AudioCallback<AnyEngine> {
        self.player.audio_callback()
    }

    // -------------------------------------------------------------------------
    // Presentation
    // -------------------------------------------------------------------------

    pub fn engine_info(&self) -> Arc<EngineInfo> {
        self.player.engine_info()
    }

    pub fn monitor(&self) -> &MonitorFeed {
        self.player.monitor()
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        self.player.monitor().snapshot()
    }

    pub fn channels(&self) -> &ChannelMap {
        self.player.channels()
    }

    pub fn bank(&self) -> Option<PathBuf> {
        self.player.bank()
    }

    pub fn poll_notification(&self) -> Option<Notification> {
        self.player.poll_notification()
    }

    /// Emulators of the active engine family.
    pub fn emulators(&self) -> Result<Vec<String>> {
        Ok(self.kind.enumerate_emulators(self.sample_rate())?)
    }

    // -------------------------------------------------------------------------
    // Realtime
    // -------------------------------------------------------------------------

    /// Sends one raw MIDI message. Returns false if it was dropped.
    pub fn play_midi(&self, bytes: &[u8]) -> bool {
        self.player.play_midi(bytes)
    }

    // -------------------------------------------------------------------------
    // Control
    // -------------------------------------------------------------------------

    pub fn resize(&self, chips: u32) -> Result<()> {
        Ok(self.player.resize(chips)?)
    }

    pub fn switch_emulator(&self, index: usize) -> Result<()> {
        Ok(self.player.switch_emulator(index)?)
    }

    pub fn load_bank(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(self.player.load_bank(path)?)
    }

    pub fn panic(&self) {
        self.player.panic();
    }

    pub fn set_volume(&self, percent: u32) -> Result<()> {
        Ok(self.player.set_volume(percent)?)
    }

    pub fn volume(&self) -> u32 {
        self.player.volume()
    }

    /// List available output devices.
    #[cfg(feature = "audio-io")]
    pub fn list_output_devices() -> Result<Vec<String>> {
        Ok(AudioOutput::list_output_devices()?)
    }

    /// List available MIDI input ports.
    #[cfg(feature = "midi-io")]
    pub fn list_midi_inputs() -> Result<Vec<crate::MidiInputDevice>> {
        crate::midi_input::list_devices()
    }
}
