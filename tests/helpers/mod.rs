//! Test helpers for fmhost host tests.
//!
//! Every host here is headless: no audio device, no MIDI port. The pipeline
//! is driven by hand through [`FmHost::audio_callback`].

#![allow(dead_code)]

use fmhost::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

pub const TEST_SAMPLE_RATE: u32 = 48000;

/// Standard block size for pulling audio by hand
pub const TEST_BLOCK_FRAMES: usize = 256;

/// Headless host on the silent engine.
pub fn null_host() -> FmHost {
    null_host_with(|builder| builder)
}

/// Headless host on the silent engine with extra builder settings.
pub fn null_host_with(configure: impl FnOnce(FmHostBuilder) -> FmHostBuilder) -> FmHost {
    configure(
        FmHost::builder()
            .engine(EngineKind::Null)
            .headless(TEST_SAMPLE_RATE),
    )
    .build()
    .expect("Failed to create headless host")
}

/// Renders `blocks` interleaved stereo blocks and returns how many were
/// actually rendered (not replaced by silence).
pub fn pull_blocks(host: &FmHost, blocks: usize) -> usize {
    let mut callback = host.audio_callback();
    let mut buffer = vec![0.0f32; TEST_BLOCK_FRAMES * 2];
    (0..blocks)
        .filter(|_| callback.process_interleaved(&mut buffer, 2))
        .count()
}

/// A regular file usable as a bank by the silent engine.
pub fn bank_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create bank file");
    file.write_all(b"bank").expect("Failed to write bank file");
    file
}

/// Roland text-insert SysEx carrying `text`.
pub fn text_sysex(text: &[u8]) -> Vec<u8> {
    let mut message = vec![0xF0, 0x41, 0x10, 0x45, 0x12, 0x10, 0x00, 0x00];
    message.extend_from_slice(text);
    message.push(0x00);
    message.push(0xF7);
    message
}
