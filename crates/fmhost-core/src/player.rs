//! The player context: owner of the live engine and of everything the
//! realtime and control contexts share.

use crate::callback::AudioCallback;
use crate::config::PlayerConfig;
use crate::engine::{EngineInfo, SynthEngine};
use crate::lockfree::AtomicFloat;
use crate::metering::MonitorFeed;
use crate::midi::ChannelMap;
use crate::notify::{self, Notification, NotificationReceiver, NotificationSender};
use crate::Result;
use arc_swap::{ArcSwap, ArcSwapOption};
use parking_lot::{Mutex, MutexGuard};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// State guarded by the engine lock.
pub(crate) struct Live<E> {
    pub(crate) engine: E,
    pub(crate) notifications: NotificationSender,
}

/// One live synthesis engine plus the state shared around it.
///
/// Built once at startup and shared behind an `Arc` between the MIDI
/// thread ([`play_midi`](Player::play_midi)), the audio thread
/// ([`AudioCallback`]) and the control context (resize, emulator switch,
/// bank load). A single mutex guards the engine: the realtime paths only
/// ever `try_lock` it and degrade to a dropped message or a silent buffer,
/// the control path waits.
pub struct Player<E: SynthEngine> {
    pub(crate) live: Mutex<Live<E>>,
    pub(crate) channels: ChannelMap,
    pub(crate) monitor: MonitorFeed,
    pub(crate) info: ArcSwap<EngineInfo>,
    pub(crate) bank: ArcSwapOption<PathBuf>,
    pub(crate) emulator: AtomicUsize,
    pub(crate) volume: AtomicU32,
    pub(crate) gain: AtomicFloat,
    notifications: Mutex<NotificationReceiver>,
    sample_rate: u32,
    dc_cutoff: f64,
    release_samples: f64,
    pub(crate) device_id: u8,
}

impl<E: SynthEngine> Player<E> {
    /// Creates the engine at `config.sample_rate` and applies the startup
    /// configuration.
    pub fn create(config: &PlayerConfig) -> Result<Self> {
        config.validate()?;
        let engine = E::create(config.sample_rate)?;
        Self::new(engine, config)
    }

    /// Wraps an existing engine. The engine's own sample rate wins over
    /// `config.sample_rate`.
    ///
    /// Applies emulator, bank and chip count in that order. Any failure here
    /// is returned as is; startup failures are fatal to the caller.
    pub fn new(mut engine: E, config: &PlayerConfig) -> Result<Self> {
        let config = PlayerConfig {
            sample_rate: engine.sample_rate(),
            ..config.clone()
        };
        config.validate()?;

        info!("Engine: {} {}", engine.name(), engine.version());

        engine.set_emulator(config.emulator)?;
        info!(
            "Emulator: {} ({})",
            engine.emulator_name(),
            config.emulator
        );

        match &config.bank {
            Some(path) => {
                engine.load_bank_file(path)?;
                info!("Bank: {}", path.display());
            }
            None => info!("Using default bank"),
        }

        engine.set_chip_count(config.chip_count)?;

        info!("DC filter cutoff: {} Hz", config.dc_cutoff_hz);
        info!("Level monitor release: {} s", config.level_release_secs);

        let info = EngineInfo::capture(&engine, config.emulator);
        let (sender, receiver) = notify::notification_channel(notify::DEFAULT_CAPACITY);

        info!("Ready with {} chips", info.chip_count);

        Ok(Self {
            live: Mutex::new(Live {
                engine,
                notifications: sender,
            }),
            channels: ChannelMap::new(),
            monitor: MonitorFeed::new(config.sample_rate as f64),
            info: ArcSwap::from_pointee(info),
            bank: ArcSwapOption::from(config.bank.clone().map(Arc::new)),
            emulator: AtomicUsize::new(config.emulator),
            volume: AtomicU32::new(config.volume),
            gain: AtomicFloat::new(config.volume as f32 / 100.0),
            notifications: Mutex::new(receiver),
            sample_rate: config.sample_rate,
            dc_cutoff: config.normalized_dc_cutoff(),
            release_samples: config.level_release_samples(),
            device_id: config.sysex_device_id,
        })
    }

    /// Audio pipeline for one output stream, with its own conditioner state.
    pub fn audio_callback(self: &Arc<Self>) -> AudioCallback<E> {
        AudioCallback::new(Arc::clone(self), self.dc_cutoff, self.release_samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// SysEx device id this player answers to, besides broadcast.
    pub fn sysex_device_id(&self) -> u8 {
        self.device_id
    }

    /// Engine introspection as of the last control operation.
    pub fn engine_info(&self) -> Arc<EngineInfo> {
        self.info.load_full()
    }

    pub fn chip_count(&self) -> u32 {
        self.info.load().chip_count
    }

    pub fn emulator(&self) -> usize {
        self.emulator.load(Ordering::Acquire)
    }

    /// Bank in use, `None` for the engine default.
    pub fn bank(&self) -> Option<PathBuf> {
        self.bank.load().as_deref().cloned()
    }

    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    pub fn monitor(&self) -> &MonitorFeed {
        &self.monitor
    }

    pub fn poll_notification(&self) -> Option<Notification> {
        self.notifications.lock().poll()
    }

    /// Runs `f` with the engine lock held, waiting for it if needed.
    ///
    /// The realtime paths see the engine as busy for as long as `f` runs.
    pub fn with_engine<R>(&self, f: impl FnOnce(&E) -> R) -> R {
        let live = self.live.lock();
        f(&live.engine)
    }

    pub(crate) fn lock_live(&self) -> MutexGuard<'_, Live<E>> {
        self.live.lock()
    }

    pub(crate) fn publish_info(&self, engine: &E) {
        self.info
            .store(Arc::new(EngineInfo::capture(engine, self.emulator())));
    }
}
