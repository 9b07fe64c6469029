//! Render-time tracking for the audio callback.

use crate::lockfree::AtomicDouble;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

/// CPU metrics snapshot. Ratios are render time over buffer duration.
#[derive(Debug, Clone, Default)]
pub struct CpuMetrics {
    pub current: f64,
    pub peak: f64,
    pub average: f64,
    pub overruns: u64,
}

/// Render-time meter written by the audio callback.
///
/// A ratio above 1.0 means the engine took longer to render a buffer than the
/// buffer lasts, i.e. it cannot keep up with the sample rate.
pub struct CpuMeter {
    current: AtomicDouble,
    peak: AtomicDouble,
    average: AtomicDouble,
    overruns: AtomicU64,
    samples: AtomicU32,
    sample_rate: f64,
}

impl CpuMeter {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            current: AtomicDouble::new(0.0),
            peak: AtomicDouble::new(0.0),
            average: AtomicDouble::new(0.0),
            overruns: AtomicU64::new(0),
            samples: AtomicU32::new(0),
            sample_rate,
        }
    }

    /// Records one render of `frames` frames that took `elapsed`.
    pub fn record(&self, frames: usize, elapsed: Duration) -> f64 {
        if frames == 0 {
            return self.current.get();
        }

        let max_time = frames as f64 / self.sample_rate;
        let ratio = elapsed.as_secs_f64() / max_time;

        self.current.set(ratio);
        self.peak.raise(ratio);

        // Exponential moving average
        let count = self.samples.fetch_add(1, Ordering::Relaxed);
        let alpha = 1.0 / (count.min(100) + 1) as f64;
        let avg = self.average.get();
        self.average.set(avg * (1.0 - alpha) + ratio * alpha);

        if ratio > 1.0 {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }

        ratio
    }

    pub fn ratio(&self) -> f64 {
        self.current.get()
    }

    pub fn metrics(&self) -> CpuMetrics {
        CpuMetrics {
            current: self.current.get(),
            peak: self.peak.get(),
            average: self.average.get(),
            overruns: self.overruns.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.current.set(0.0);
        self.peak.set(0.0);
        self.average.set(0.0);
        self.overruns.store(0, Ordering::Relaxed);
        self.samples.store(0, Ordering::Relaxed);
    }
}
