//! # fmhost - MIDI-driven synthesizer host
//!
//! Plays incoming MIDI on one synthesis engine in real time.
//!
//! ## Architecture
//!
//! fmhost is an umbrella crate that coordinates:
//! - **fmhost-core** - Realtime core (engine contract, MIDI dispatch, audio pipeline, control surface, metering)
//! - **fmhost-synth** - Engine families (SoundFont, Null) and the engine registry
//!
//! ## Quick Start
//!
//! ```ignore
//! use fmhost::prelude::*;
//!
//! let host = FmHost::builder()
//!     .engine(EngineKind::SoundFont)
//!     .bank("gm.sf2")
//!     .build()?;
//!
//! host.play_midi(&[0x90, 60, 100]);
//! host.resize(4)?;
//! println!("{:?}", host.snapshot());
//! ```
//!
//! ## Feature Flags
//!
//! - `default` / `full` - Everything enabled
//! - `soundfont` - RustySynth engine family
//! - `audio-io` - CPAL audio output
//! - `midi-io` - Hardware MIDI input (midir)
//! - `cli` - The `fmhost` binary

/// Re-export of fmhost-core for direct access
pub use fmhost_core as core;

/// Re-export of fmhost-synth for direct access
pub use fmhost_synth as synth;

pub use fmhost_core::{
    AudioCallback, ChannelMap, CpuMetrics, EngineInfo, MonitorFeed, MonitorSnapshot,
    Notification, Player, PlayerConfig, Program, SynthEngine,
};
pub use fmhost_synth::{AnyEngine, EngineKind};

mod error;
pub use error::{Error, Result};

mod builder;
mod engine;

pub use builder::FmHostBuilder;
pub use engine::FmHost;

#[cfg(feature = "midi-io")]
mod midi_input;
#[cfg(feature = "midi-io")]
pub use midi_input::{MidiInputDevice, MidiInputHandle};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{FmHost, FmHostBuilder};

    pub use crate::{EngineKind, MonitorSnapshot, Notification, PlayerConfig};

    pub use crate::{Error, Result};
}
