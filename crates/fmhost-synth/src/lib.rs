//! Engine families for fmhost.
//!
//! # Engines
//!
//! - [`NullEngine`]: renders silence (always available)
//! - [`SoundFontEngine`]: RustySynth over a `.sf2` bank (`"soundfont"`, default)
//!
//! [`EngineKind`] selects a family at startup and [`AnyEngine`] holds one
//! engine of any family behind the [`SynthEngine`](fmhost_core::SynthEngine)
//! contract.
//!
//! # Example
//!
//! ```ignore
//! use fmhost_synth::EngineKind;
//!
//! for kind in EngineKind::ALL {
//!     println!("{}: {:?}", kind, kind.enumerate_emulators(44100)?);
//! }
//! let engine = EngineKind::from_name("soundfont")?.create(44100)?;
//! ```

#[macro_use]
mod macros;

mod null;
pub use null::{NullEngine, NULL_MAX_CHIPS};

mod registry;
pub use registry::{AnyEngine, EngineKind};

#[cfg(feature = "soundfont")]
pub mod soundfont;

#[cfg(feature = "soundfont")]
pub use soundfont::SoundFontEngine;
