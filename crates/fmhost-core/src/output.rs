//! CPAL audio output wrapper.

use crate::callback::AudioCallback;
use crate::engine::SynthEngine;
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{info, warn};

/// Frames converted per pass when the device format is not `f32`.
const CONVERT_FRAMES: usize = 2048;

/// Wrapper to hold a `cpal::Stream` in a `Send` context.
///
/// `cpal::Stream` is `!Send` due to platform internals. The stream is
/// created, kept and dropped by the owning [`AudioOutput`], which is never
/// shared between threads.
struct StreamHandle(#[allow(dead_code)] cpal::Stream);

// SAFETY: The stream is only touched through `AudioOutput`, which takes
// `&mut self` for every operation on it, so it is never accessed concurrently.
unsafe impl Send for StreamHandle {}

/// Output stream on one CPAL device.
pub struct AudioOutput {
    sample_rate: u32,
    channels: usize,
    device_index: Option<usize>,
    stream: Option<StreamHandle>,
}

impl AudioOutput {
    /// Opens the device at `device_index`, or the default output device.
    /// The stream is not started until [`start`](Self::start).
    pub fn new(device_index: Option<usize>) -> Result<Self> {
        let device = Self::get_device(device_index)?;
        let output_config = device.default_output_config()?;

        Ok(Self {
            sample_rate: output_config.sample_rate().0,
            channels: output_config.channels() as usize,
            device_index,
            stream: None,
        })
    }

    /// Starts streaming from `callback`. The callback's player must run at
    /// [`sample_rate`](Self::sample_rate).
    pub fn start<E: SynthEngine>(&mut self, callback: AudioCallback<E>) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        if callback.player().sample_rate() != self.sample_rate {
            return Err(Error::InvalidConfig(format!(
                "player runs at {} Hz, device at {} Hz",
                callback.player().sample_rate(),
                self.sample_rate
            )));
        }

        let device = Self::get_device(self.device_index)?;
        let config = device.default_output_config()?;

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32, E>(&device, &config.into(), callback)?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16, E>(&device, &config.into(), callback)?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16, E>(&device, &config.into(), callback)?,
            format => {
                return Err(Error::InvalidConfig(format!(
                    "Unsupported sample format: {:?}",
                    format
                )));
            }
        };

        stream.play()?;
        info!(
            "Audio output: {} Hz, {} channels",
            self.sample_rate, self.channels
        );

        self.stream = Some(StreamHandle(stream));
        Ok(())
    }

    /// Stops and drops the stream.
    pub fn stop(&mut self) {
        self.stream = None;
    }

    fn get_device(index: Option<usize>) -> Result<cpal::Device> {
        let host = cpal::default_host();

        if let Some(idx) = index {
            let devices: Vec<_> = host.output_devices()?.collect();

            let device_count = devices.len();
            devices.into_iter().nth(idx).ok_or_else(|| {
                Error::InvalidDevice(format!(
                    "Output device index {} out of range (available: {})",
                    idx, device_count
                ))
            })
        } else {
            host.default_output_device()
                .ok_or_else(|| Error::InvalidDevice("No output device available".to_string()))
        }
    }

    fn build_stream<T, E>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        mut callback: AudioCallback<E>,
    ) -> Result<cpal::Stream>
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
        E: SynthEngine,
    {
        let channels = (config.channels as usize).max(1);
        let mut buffer = vec![0.0f32; CONVERT_FRAMES * channels];

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    for chunk in data.chunks_mut(buffer.len()) {
                        let scratch = &mut buffer[..chunk.len()];
                        callback.process_interleaved(scratch, channels);
                        for (sample, value) in chunk.iter_mut().zip(scratch.iter()) {
                            *sample = T::from_sample(*value);
                        }
                    }
                }));

                if result.is_err() {
                    // Panic in callback - output silence
                    for sample in data.iter_mut() {
                        *sample = T::from_sample(0.0);
                    }
                }
            },
            |err| warn!("Audio stream error: {}", err),
            None,
        )?;

        Ok(stream)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    /// List available output devices.
    pub fn list_output_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        let devices: Result<Vec<String>> = host
            .output_devices()?
            .enumerate()
            .map(|(idx, device)| Ok(format!("{}: {}", idx, device.name()?)))
            .collect();
        devices
    }

    /// Name of the device this output plays on.
    pub fn device_name(&self) -> Result<String> {
        let device = Self::get_device(self.device_index)?;
        Ok(device.name()?)
    }
}
