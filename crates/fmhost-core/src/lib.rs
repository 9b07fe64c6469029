//! Realtime core of a MIDI-driven synthesizer host.
//!
//! # Primary API
//!
//! - [`SynthEngine`]: contract every engine family implements
//! - [`Player`]: owner of the live engine, shared between threads
//! - [`Player::play_midi`]: realtime MIDI dispatch, never blocks
//! - [`AudioCallback`]: realtime render + DC filter + level monitor
//! - [`Player::resize`], [`Player::switch_emulator`], [`Player::load_bank`]: control surface
//! - [`MonitorFeed`]: lock-free levels and CPU ratio for a UI
//!
//! # Feature-gated APIs
//!
//! - `"audio-io"`: [`AudioOutput`] CPAL output stream (enabled by default)
//!
//! # Example
//!
//! ```ignore
//! use fmhost_core::prelude::*;
//!
//! let player = Arc::new(Player::<MyEngine>::create(&PlayerConfig::default())?);
//! let mut callback = player.audio_callback();
//!
//! player.play_midi(&[0x90, 60, 100]);
//! callback.process(64, &mut left, &mut right, 1);
//! let snapshot = player.monitor().snapshot();
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::PlayerConfig;

mod engine;
pub use engine::{enumerate_emulators, fill_silence, EngineInfo, SynthEngine};

pub mod conditioner;
pub use conditioner::{DcFilter, LevelMonitor, SignalConditioner};

pub(crate) mod lockfree;
pub use lockfree::{AtomicDouble, AtomicFloat};

pub(crate) mod metering;
pub use metering::{CpuMeter, CpuMetrics, MonitorFeed, MonitorSnapshot};

pub mod midi;
pub use midi::{ChannelMap, ChannelVoice, MidiMessage, Program, MIDI_CHANNELS};

pub mod notify;
pub use notify::Notification;

mod player;
pub use player::Player;

mod callback;
pub use callback::AudioCallback;

mod control;
mod dispatch;

#[cfg(feature = "audio-io")]
mod output;
#[cfg(feature = "audio-io")]
pub use output::AudioOutput;

pub mod prelude {
    //! Common imports.
    pub use crate::{
        AudioCallback, ChannelMap, EngineInfo, Error, MonitorSnapshot, Notification, Player,
        PlayerConfig, Result, SynthEngine,
    };
    pub use std::sync::Arc;
}
