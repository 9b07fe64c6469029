//! Test helpers for fmhost-core integration tests.
//!
//! [`MockEngine`] records every call it receives so tests can assert on what
//! reached the engine, and renders a constant while any note is held.

#![allow(dead_code)]

use fmhost_core::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

pub const TEST_SAMPLE_RATE: u32 = 44100;

pub const MOCK_EMULATORS: [&str; 3] = ["Mock OPL2", "Mock OPL3", "Mock OPN2"];
pub const MOCK_MAX_CHIPS: u32 = 8;
pub const MOCK_DEFAULT_BANK: &str = "<built-in>";

/// Level rendered while a note is held.
pub const MOCK_LEVEL: f32 = 0.25;

/// One call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    NoteOn(u8, u8, u8),
    NoteOff(u8, u8),
    NoteAftertouch(u8, u8, u8),
    ChannelAftertouch(u8, u8),
    Controller(u8, u8, u8),
    Program(u8, u8),
    PitchBend(u8, u16),
    Panic,
    SetChips(u32),
    SetEmulator(usize),
    LoadBank(PathBuf),
}

/// Counts engine calls running at the same time.
#[derive(Debug, Default)]
pub struct Overlap {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    entered: AtomicUsize,
}

impl Overlap {
    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.entered.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_micros(50));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }
}

pub struct MockEngine {
    sample_rate: u32,
    emulator: usize,
    chips: u32,
    bank: PathBuf,
    sounding: BTreeSet<(u8, u8)>,
    pub calls: Vec<Call>,
    overlap: Option<Arc<Overlap>>,
}

impl MockEngine {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            emulator: 0,
            chips: 1,
            bank: PathBuf::from(MOCK_DEFAULT_BANK),
            sounding: BTreeSet::new(),
            calls: Vec::new(),
            overlap: None,
        }
    }

    pub fn with_overlap(mut self, overlap: Arc<Overlap>) -> Self {
        self.overlap = Some(overlap);
        self
    }

    pub fn bank(&self) -> &Path {
        &self.bank
    }

    pub fn is_silent(&self) -> bool {
        self.sounding.is_empty()
    }

    fn record(&mut self, call: Call) {
        if let Some(overlap) = &self.overlap {
            overlap.enter();
        }
        self.calls.push(call);
    }
}

impl SynthEngine for MockEngine {
    fn create(sample_rate: u32) -> Result<Self> {
        Ok(Self::new(sample_rate))
    }

    fn name(&self) -> &'static str {
        "Mock"
    }

    fn version(&self) -> &'static str {
        "1.0"
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn emulator_name(&self) -> &str {
        MOCK_EMULATORS[self.emulator]
    }

    fn chip_count(&self) -> u32 {
        self.chips
    }

    fn set_chip_count(&mut self, count: u32) -> Result<()> {
        self.record(Call::SetChips(count));
        if !(1..=MOCK_MAX_CHIPS).contains(&count) {
            return Err(Error::Config(format!("{} chips not supported", count)));
        }
        self.chips = count;
        Ok(())
    }

    fn set_emulator(&mut self, index: usize) -> Result<()> {
        self.record(Call::SetEmulator(index));
        if index >= MOCK_EMULATORS.len() {
            return Err(Error::Config(format!("no emulator {}", index)));
        }
        self.emulator = index;
        Ok(())
    }

    fn load_bank_file(&mut self, path: &Path) -> Result<()> {
        self.record(Call::LoadBank(path.to_path_buf()));
        if !path.is_file() {
            return Err(Error::bank_load(path, "not a file"));
        }
        self.bank = path.to_path_buf();
        Ok(())
    }

    fn panic(&mut self) {
        self.record(Call::Panic);
        self.sounding.clear();
    }

    fn rt_note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        self.record(Call::NoteOn(channel, note, velocity));
        self.sounding.insert((channel, note));
    }

    fn rt_note_off(&mut self, channel: u8, note: u8) {
        self.record(Call::NoteOff(channel, note));
        self.sounding.remove(&(channel, note));
    }

    fn rt_note_aftertouch(&mut self, channel: u8, note: u8, pressure: u8) {
        self.record(Call::NoteAftertouch(channel, note, pressure));
    }

    fn rt_channel_aftertouch(&mut self, channel: u8, pressure: u8) {
        self.record(Call::ChannelAftertouch(channel, pressure));
    }

    fn rt_controller_change(&mut self, channel: u8, controller: u8, value: u8) {
        self.record(Call::Controller(channel, controller, value));
    }

    fn rt_program_change(&mut self, channel: u8, program: u8) {
        self.record(Call::Program(channel, program));
    }

    fn rt_pitch_bend(&mut self, channel: u8, value: u16) {
        self.record(Call::PitchBend(channel, value));
    }

    fn generate(&mut self, frames: usize, left: &mut [f32], right: &mut [f32], stride: usize) {
        if let Some(overlap) = &self.overlap {
            overlap.enter();
        }
        let level = if self.sounding.is_empty() {
            0.0
        } else {
            MOCK_LEVEL
        };
        for i in 0..frames {
            left[i * stride] = level;
            right[i * stride] = level;
        }
    }
}

/// Player over a fresh mock with default configuration.
pub fn test_player() -> Arc<Player<MockEngine>> {
    test_player_with(PlayerConfig::default())
}

pub fn test_player_with(config: PlayerConfig) -> Arc<Player<MockEngine>> {
    Arc::new(Player::create(&config).expect("Failed to create test player"))
}

/// Calls recorded by the live engine since startup.
pub fn calls(player: &Player<MockEngine>) -> Vec<Call> {
    player.with_engine(|engine| engine.calls.clone())
}

/// Calls recorded after the first `skip`.
pub fn calls_after(player: &Player<MockEngine>, skip: usize) -> Vec<Call> {
    player.with_engine(|engine| engine.calls[skip..].to_vec())
}

pub fn call_count(player: &Player<MockEngine>) -> usize {
    player.with_engine(|engine| engine.calls.len())
}

/// Calls that re-send every channel's bank select and program as the
/// player's channel map currently records them.
pub fn program_replay(player: &Player<MockEngine>) -> Vec<Call> {
    player
        .channels()
        .programs()
        .iter()
        .enumerate()
        .flat_map(|(channel, program)| {
            let channel = channel as u8;
            [
                Call::Controller(channel, 0, program.bank_msb),
                Call::Controller(channel, 32, program.bank_lsb),
                Call::Program(channel, program.gm),
            ]
        })
        .collect()
}

/// Whether every rendered slot is exactly zero.
pub fn is_silent(samples: &[f32]) -> bool {
    samples.iter().all(|s| *s == 0.0)
}
