//! System exclusive messages.

/// Default device id this player answers to.
pub const DEFAULT_DEVICE_ID: u8 = 0x10;
pub const BROADCAST_ID: u8 = 0x7F;

const MANUFACTURER_ROLAND: u8 = 0x41;
const ROLAND_MODEL_SC: u8 = 0x45;
const ROLAND_MODE_RECEIVE: u8 = 0x12;
const SC_TEXT_INSERT: u32 = 0x10_0000;

/// Longest text insert payload kept.
pub const MAX_TEXT_LEN: usize = 256;

/// Recognized SysEx request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysEx<'a> {
    /// Roland SC display text.
    TextInsert(&'a [u8]),
}

impl<'a> SysEx<'a> {
    /// Parses a complete `F0 .. F7` message addressed to `device_id` or to
    /// the broadcast id. Unknown or malformed messages yield `None`.
    pub fn parse(msg: &'a [u8], device_id: u8) -> Option<Self> {
        let len = msg.len();
        if len < 4 || msg[0] != 0xF0 || msg[len - 1] != 0xF7 {
            return None;
        }
        if msg[2] != device_id && msg[2] != BROADCAST_ID {
            return None;
        }

        match msg[1] {
            MANUFACTURER_ROLAND => Self::parse_roland(msg),
            _ => None,
        }
    }

    fn parse_roland(msg: &'a [u8]) -> Option<Self> {
        // F0 41 dev model mode a2 a1 a0 data.. checksum F7
        if msg.len() < 10 {
            return None;
        }
        let model = msg[3];
        let mode = msg[4];
        if mode != ROLAND_MODE_RECEIVE {
            return None;
        }
        let address = (msg[5] as u32) << 16 | (msg[6] as u32) << 8 | msg[7] as u32;
        let data = &msg[8..msg.len() - 2];

        match (model, address) {
            (ROLAND_MODEL_SC, SC_TEXT_INSERT) => {
                Some(SysEx::TextInsert(&data[..data.len().min(MAX_TEXT_LEN)]))
            }
            _ => None,
        }
    }
}
