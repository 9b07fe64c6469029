//! Output signal conditioning: DC blocking and level following.

use std::f64::consts::PI;

/// One-pole DC-blocking (high-pass) filter.
///
/// `y[n] = x[n] - x[n-1] + R * y[n-1]` with `R = exp(-2π fc)`, where `fc` is
/// the cutoff as a fraction of the sample rate.
#[derive(Debug, Clone)]
pub struct DcFilter {
    pole: f64,
    last_input: f64,
    last_output: f64,
}

impl DcFilter {
    pub fn new(normalized_cutoff: f64) -> Self {
        let mut filter = Self {
            pole: 0.0,
            last_input: 0.0,
            last_output: 0.0,
        };
        filter.set_cutoff(normalized_cutoff);
        filter
    }

    fn set_cutoff(&mut self, normalized_cutoff: f64) {
        self.pole = (-2.0 * PI * normalized_cutoff).exp();
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = input - self.last_input + self.pole * self.last_output;
        self.last_input = input;
        self.last_output = output;
        output
    }
}

/// Peak follower with instantaneous attack and exponential release.
#[derive(Debug, Clone)]
pub struct LevelMonitor {
    decay: f64,
    level: f64,
}

impl LevelMonitor {
    /// `release_samples` is the time constant of the release, in samples.
    pub fn new(release_samples: f64) -> Self {
        let mut monitor = Self {
            decay: 0.0,
            level: 0.0,
        };
        monitor.set_release(release_samples);
        monitor
    }

    fn set_release(&mut self, release_samples: f64) {
        self.decay = if release_samples <= 0.0 {
            0.0
        } else {
            (-1.0 / release_samples).exp()
        };
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let magnitude = input.abs();
        self.level = if magnitude > self.level {
            magnitude
        } else {
            self.level * self.decay
        };
        self.level
    }

    pub fn level(&self) -> f64 {
        self.level
    }
}

/// DC filter followed by a level monitor, one per output channel.
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    dc: DcFilter,
    monitor: LevelMonitor,
}

impl SignalConditioner {
    pub fn new(normalized_cutoff: f64, release_samples: f64) -> Self {
        Self {
            dc: DcFilter::new(normalized_cutoff),
            monitor: LevelMonitor::new(release_samples),
        }
    }

    /// Returns the filtered sample; the level is read with [`level`](Self::level).
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let filtered = self.dc.process(input);
        self.monitor.process(filtered);
        filtered
    }

    pub fn level(&self) -> f64 {
        self.monitor.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SR: f64 = 44100.0;

    #[test]
    fn test_dc_filter_blocks_constant_offset() {
        let mut filter = DcFilter::new(5.0 / SR);
        let first = filter.process(1.0);
        assert_relative_eq!(first, 1.0);

        let mut last = first;
        for _ in 1..10000 {
            let out = filter.process(1.0);
            assert!(out.abs() <= last.abs() + 1e-12);
            last = out;
        }
        assert!(last.abs() < 1e-2, "DC not removed: {}", last);
    }

    #[test]
    fn test_dc_filter_passes_high_frequency() {
        let mut filter = DcFilter::new(5.0 / SR);
        let mut peak: f64 = 0.0;
        for i in 0..4410 {
            let x = (2.0 * PI * 1000.0 * i as f64 / SR).sin();
            let y = filter.process(x);
            if i > 441 {
                peak = peak.max(y.abs());
            }
        }
        assert_relative_eq!(peak, 1.0, epsilon = 0.01);
    }

    #[test]
    fn test_level_monitor_attack_is_instant() {
        let mut monitor = LevelMonitor::new(0.1 * SR);
        assert_relative_eq!(monitor.process(0.8), 0.8);
        assert_relative_eq!(monitor.process(-0.9), 0.9);
    }

    #[test]
    fn test_level_monitor_releases_exponentially() {
        let release = 0.1 * SR;
        let mut monitor = LevelMonitor::new(release);
        monitor.process(1.0);
        for _ in 0..release as usize {
            monitor.process(0.0);
        }
        // One time constant later the level is down to 1/e.
        assert_relative_eq!(monitor.level(), (-1.0f64).exp(), epsilon = 1e-3);
    }

    #[test]
    fn test_conditioner_tracks_filtered_signal() {
        let mut conditioner = SignalConditioner::new(5.0 / SR, 0.1 * SR);
        for _ in 0..100000 {
            conditioner.process(0.5);
        }
        // Constant input is filtered away, so the level decays too.
        assert!(conditioner.level() < 0.01);
    }
}
