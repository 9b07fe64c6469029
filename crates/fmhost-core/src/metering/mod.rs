//! Output metering for the presentation layer.
//!
//! Written by the audio callback without locking, read at UI refresh rate.

mod cpu;
mod monitor;

pub use cpu::{CpuMeter, CpuMetrics};
pub use monitor::{MonitorFeed, MonitorSnapshot};
