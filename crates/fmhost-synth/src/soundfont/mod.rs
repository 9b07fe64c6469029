//! SoundFont (.sf2) synthesis via RustySynth.
//!
//! Provides [`SoundFontEngine`], the sample-based engine family.

mod engine;

pub use engine::{SoundFontEngine, SOUNDFONT_MAX_CHIPS, VOICES_PER_CHIP};
