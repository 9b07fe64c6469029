//! Test helpers for the engine families.
//!
//! [`square_bank`] writes the smallest SoundFont RustySynth accepts: one
//! preset at bank 0 program 0 playing one looped square-wave sample over the
//! whole keyboard.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

/// Rate and root key of the bank's only sample.
pub const BANK_SAMPLE_RATE: u32 = 44100;
pub const BANK_ROOT_KEY: u8 = 60;

const SAMPLE_FRAMES: u32 = 1000;
const SQUARE_PERIOD: u32 = 100;
const SQUARE_AMPLITUDE: i16 = 8000;

// Generator operators
const GEN_INSTRUMENT: u16 = 41;
const GEN_SAMPLE_ID: u16 = 53;
const GEN_SAMPLE_MODES: u16 = 54;

const LOOP_CONTINUOUSLY: u16 = 1;
const MONO_SAMPLE: u16 = 1;

fn chunk(id: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + data.len());
    out.extend_from_slice(id);
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    out
}

fn list(kind: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut data = kind.to_vec();
    for c in chunks {
        data.extend_from_slice(c);
    }
    chunk(b"LIST", &data)
}

/// Zero-padded 20-byte record name.
fn name(text: &str) -> [u8; 20] {
    let mut out = [0u8; 20];
    out[..text.len()].copy_from_slice(text.as_bytes());
    out
}

fn preset_header(label: &str, bag: u16) -> Vec<u8> {
    let mut out = name(label).to_vec();
    out.extend_from_slice(&0u16.to_le_bytes()); // program
    out.extend_from_slice(&0u16.to_le_bytes()); // bank
    out.extend_from_slice(&bag.to_le_bytes());
    out.extend_from_slice(&[0; 12]); // library, genre, morphology
    out
}

fn instrument_header(label: &str, bag: u16) -> Vec<u8> {
    let mut out = name(label).to_vec();
    out.extend_from_slice(&bag.to_le_bytes());
    out
}

fn bag(generator: u16) -> Vec<u8> {
    let mut out = generator.to_le_bytes().to_vec();
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

fn generator(operator: u16, amount: u16) -> Vec<u8> {
    let mut out = operator.to_le_bytes().to_vec();
    out.extend_from_slice(&amount.to_le_bytes());
    out
}

fn sample_header() -> Vec<u8> {
    let mut out = name("Square").to_vec();
    for value in [0, SAMPLE_FRAMES, SQUARE_PERIOD, SAMPLE_FRAMES - SQUARE_PERIOD] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&BANK_SAMPLE_RATE.to_le_bytes());
    out.push(BANK_ROOT_KEY);
    out.push(0); // pitch correction
    out.extend_from_slice(&0u16.to_le_bytes()); // link
    out.extend_from_slice(&MONO_SAMPLE.to_le_bytes());
    out
}

fn sample_data() -> Vec<u8> {
    // Sample frames followed by silence, as the format asks.
    (0..SAMPLE_FRAMES * 2)
        .map(|i| match i {
            i if i >= SAMPLE_FRAMES => 0,
            i if i % SQUARE_PERIOD < SQUARE_PERIOD / 2 => SQUARE_AMPLITUDE,
            _ => -SQUARE_AMPLITUDE,
        })
        .flat_map(i16::to_le_bytes)
        .collect()
}

/// Bytes of a one-preset SoundFont.
pub fn square_bank_bytes() -> Vec<u8> {
    let mut version = 2u16.to_le_bytes().to_vec();
    version.extend_from_slice(&1u16.to_le_bytes());
    let info = list(
        b"INFO",
        &[
            chunk(b"ifil", &version),
            chunk(b"isng", b"EMU8000\0"),
            chunk(b"INAM", b"Square\0\0"),
        ],
    );

    let sdta = list(b"sdta", &[chunk(b"smpl", &sample_data())]);

    let pdta = list(
        b"pdta",
        &[
            chunk(b"phdr", &[preset_header("Square", 0), preset_header("EOP", 1)].concat()),
            chunk(b"pbag", &[bag(0), bag(1)].concat()),
            chunk(b"pmod", &[0; 10]),
            chunk(b"pgen", &[generator(GEN_INSTRUMENT, 0), generator(0, 0)].concat()),
            chunk(
                b"inst",
                &[instrument_header("Square", 0), instrument_header("EOI", 1)].concat(),
            ),
            chunk(b"ibag", &[bag(0), bag(2)].concat()),
            chunk(b"imod", &[0; 10]),
            chunk(
                b"igen",
                &[
                    generator(GEN_SAMPLE_MODES, LOOP_CONTINUOUSLY),
                    generator(GEN_SAMPLE_ID, 0),
                    generator(0, 0),
                ]
                .concat(),
            ),
            chunk(b"shdr", &[sample_header(), vec![0; 46]].concat()),
        ],
    );

    let mut body = b"sfbk".to_vec();
    body.extend_from_slice(&info);
    body.extend_from_slice(&sdta);
    body.extend_from_slice(&pdta);
    chunk(b"RIFF", &body)
}

/// One-preset SoundFont on disk.
pub fn square_bank() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create bank file");
    file.write_all(&square_bank_bytes())
        .expect("Failed to write bank file");
    file
}

/// A file that starts like a SoundFont and then stops.
pub fn truncated_bank() -> NamedTempFile {
    let bytes = square_bank_bytes();
    let mut file = NamedTempFile::new().expect("Failed to create bank file");
    file.write_all(&bytes[..bytes.len() / 2])
        .expect("Failed to write bank file");
    file
}

/// Whether any sample at a multiple of `stride` is non-zero.
pub fn has_signal(samples: &[f32], stride: usize) -> bool {
    samples.iter().step_by(stride).any(|s| *s != 0.0)
}
