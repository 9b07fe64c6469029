//! Lock-free level and CPU monitor.

use super::{CpuMeter, CpuMetrics};
use crate::lockfree::AtomicDouble;

/// Levels and CPU ratio at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonitorSnapshot {
    pub left: f64,
    pub right: f64,
    pub cpu_ratio: f64,
}

impl MonitorSnapshot {
    /// Whether either channel went past full scale.
    pub fn is_clipping(&self) -> bool {
        self.left > 1.0 || self.right > 1.0
    }
}

/// Most recent conditioner levels and render CPU ratio.
///
/// The fields are independent scalars: a reader can see the left level of
/// one callback next to the right level of the previous one. That is fine
/// for a meter.
pub struct MonitorFeed {
    left: AtomicDouble,
    right: AtomicDouble,
    cpu: CpuMeter,
}

impl MonitorFeed {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            left: AtomicDouble::new(0.0),
            right: AtomicDouble::new(0.0),
            cpu: CpuMeter::new(sample_rate),
        }
    }

    #[inline]
    pub(crate) fn set_levels(&self, left: f64, right: f64) {
        self.left.set(left);
        self.right.set(right);
    }

    pub(crate) fn cpu_meter(&self) -> &CpuMeter {
        &self.cpu
    }

    pub fn levels(&self) -> (f64, f64) {
        (self.left.get(), self.right.get())
    }

    pub fn cpu_ratio(&self) -> f64 {
        self.cpu.ratio()
    }

    pub fn cpu_metrics(&self) -> CpuMetrics {
        self.cpu.metrics()
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        let (left, right) = self.levels();
        MonitorSnapshot {
            left,
            right,
            cpu_ratio: self.cpu_ratio(),
        }
    }
}
