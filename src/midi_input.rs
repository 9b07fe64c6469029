//! Hardware MIDI input.
//!
//! midir delivers each message on its own callback thread; the callback
//! hands the raw bytes straight to [`Player::play_midi`], which never blocks.

use crate::{Error, Result};
use fmhost_core::{Player, SynthEngine};
use midir::{Ignore, MidiInput, MidiInputConnection};
use std::sync::Arc;
use tracing::info;

const CLIENT_NAME: &str = "fmhost";

/// Information about an available MIDI input device
#[derive(Debug, Clone)]
pub struct MidiInputDevice {
    pub index: usize,
    pub name: String,
}

/// Open connection to one input port. Dropping it disconnects.
pub struct MidiInputHandle {
    _connection: MidiInputConnection<()>,
    port_name: String,
}

impl MidiInputHandle {
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

pub fn list_devices() -> Result<Vec<MidiInputDevice>> {
    let midi_input = MidiInput::new(CLIENT_NAME)?;
    let devices = midi_input
        .ports()
        .iter()
        .enumerate()
        .map(|(index, port)| MidiInputDevice {
            index,
            name: midi_input
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown Device {}", index)),
        })
        .collect();
    Ok(devices)
}

/// Connects the first input port whose name contains `pattern`
/// (case-insensitive), or the first port when `pattern` is empty.
pub fn connect<E: SynthEngine>(player: Arc<Player<E>>, pattern: &str) -> Result<MidiInputHandle> {
    let mut midi_input = MidiInput::new(CLIENT_NAME)?;
    // SysEx carries display text.
    midi_input.ignore(Ignore::None);

    let needle = pattern.to_lowercase();
    let mut selected = None;
    for port in midi_input.ports() {
        let name = midi_input.port_name(&port)?;
        if name.to_lowercase().contains(&needle) {
            selected = Some((port, name));
            break;
        }
    }
    let (port, port_name) = selected.ok_or_else(|| {
        Error::MidiPort(format!("no MIDI input port matching '{}'", pattern))
    })?;

    let connection = midi_input.connect(
        &port,
        "fmhost-input",
        move |_timestamp, message, _| {
            player.play_midi(message);
        },
        (),
    )?;

    info!("MIDI input: {}", port_name);

    Ok(MidiInputHandle {
        _connection: connection,
        port_name,
    })
}
