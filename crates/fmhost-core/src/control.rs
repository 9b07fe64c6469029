//! Control surface: operator-driven reconfiguration of the live engine.
//!
//! Every operation here waits for the engine lock and silences the engine
//! before touching its configuration, so no voice survives a resize or a
//! bank change. Failures leave the previous configuration in place and are
//! returned to the caller; none of them is fatal.
//!
//! A successful reconfiguration may hand back an engine with fresh channel
//! state, so the bank select and program of every channel are sent again
//! from the [`ChannelMap`](crate::ChannelMap).

use crate::config::MAX_VOLUME;
use crate::engine::SynthEngine;
use crate::midi::{CC_BANK_LSB, CC_BANK_MSB, MIDI_CHANNELS};
use crate::player::{Live, Player};
use crate::{Error, Result};
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl<E: SynthEngine> Player<E> {
    /// Changes the number of chips.
    ///
    /// On failure the engine may be left at another chip count; re-query
    /// [`chip_count`](Player::chip_count), which always reflects the engine.
    /// On success the CPU meter starts over.
    pub fn resize(&self, chips: u32) -> Result<()> {
        let mut live = self.lock_live();
        self.silence(&mut live);

        let result = live.engine.set_chip_count(chips);
        if result.is_ok() {
            self.restore_programs(&mut live.engine);
            self.monitor.cpu_meter().reset();
        }
        self.publish_info(&live.engine);
        drop(live);

        match &result {
            Ok(()) => info!("Resized to {} chips", chips),
            Err(e) => warn!("Resize to {} chips failed: {}", chips, e),
        }
        result
    }

    /// Switches to emulator `index` within the engine family.
    ///
    /// Switching to the active emulator is a no-op. The loaded bank is kept
    /// and the CPU meter starts over.
    pub fn switch_emulator(&self, index: usize) -> Result<()> {
        let mut live = self.lock_live();
        if index == self.emulator() {
            debug!("Emulator {} already active", index);
            return Ok(());
        }
        self.silence(&mut live);

        let result = live.engine.set_emulator(index);
        if result.is_ok() {
            self.emulator.store(index, Ordering::Release);
            self.restore_programs(&mut live.engine);
            self.monitor.cpu_meter().reset();
            self.publish_info(&live.engine);
        }
        let name = live.engine.emulator_name().to_string();
        drop(live);

        match &result {
            Ok(()) => info!("Switched to emulator {} ({})", name, index),
            Err(e) => warn!("Switch to emulator {} failed: {}", index, e),
        }
        result
    }

    /// Loads a new instrument bank. The bank reference only changes when the
    /// engine accepted the file.
    pub fn load_bank(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut live = self.lock_live();
        self.silence(&mut live);

        let result = live.engine.load_bank_file(path);
        if result.is_ok() {
            self.bank.store(Some(Arc::new(path.to_path_buf())));
            self.restore_programs(&mut live.engine);
            self.publish_info(&live.engine);
        }
        drop(live);

        match &result {
            Ok(()) => info!("Loaded bank {}", path.display()),
            Err(e) => warn!("{}", e),
        }
        result
    }

    /// Silences every voice. Calling it repeatedly has no further effect.
    pub fn panic(&self) {
        let mut live = self.lock_live();
        self.silence(&mut live);
    }

    /// Sets the output gain in percent.
    pub fn set_volume(&self, percent: u32) -> Result<()> {
        if percent > MAX_VOLUME {
            return Err(Error::Config(format!(
                "volume {}% out of range (0-{}%)",
                percent, MAX_VOLUME
            )));
        }
        self.volume.store(percent, Ordering::Relaxed);
        self.gain.set(percent as f32 / 100.0);
        debug!("Volume {}%", percent);
        Ok(())
    }

    pub fn volume(&self) -> u32 {
        self.volume.load(Ordering::Relaxed)
    }

    fn silence(&self, live: &mut Live<E>) {
        live.engine.panic();
        self.channels.clear_all_notes();
    }

    fn restore_programs(&self, engine: &mut E) {
        for channel in 0..MIDI_CHANNELS as u8 {
            let program = self.channels.program(channel);
            engine.rt_controller_change(channel, CC_BANK_MSB, program.bank_msb);
            engine.rt_controller_change(channel, CC_BANK_LSB, program.bank_lsb);
            engine.rt_program_change(channel, program.gm);
        }
    }
}
