//! Real-time audio pipeline.

use crate::conditioner::SignalConditioner;
use crate::engine::{fill_silence, SynthEngine};
use crate::player::Player;
use std::sync::Arc;
use std::time::Instant;

/// Frames rendered per engine call when filling an interleaved buffer.
const CHUNK_FRAMES: usize = 1024;

/// Renders the live engine for one output stream.
///
/// Owns the left/right conditioner state and preallocated scratch buffers,
/// so processing never allocates. Only the audio thread should hold it.
pub struct AudioCallback<E: SynthEngine> {
    player: Arc<Player<E>>,
    conditioners: [SignalConditioner; 2],
    scratch_left: Vec<f32>,
    scratch_right: Vec<f32>,
}

impl<E: SynthEngine> AudioCallback<E> {
    pub(crate) fn new(player: Arc<Player<E>>, dc_cutoff: f64, release_samples: f64) -> Self {
        let conditioner = SignalConditioner::new(dc_cutoff, release_samples);
        Self {
            player,
            conditioners: [conditioner.clone(), conditioner],
            scratch_left: vec![0.0; CHUNK_FRAMES],
            scratch_right: vec![0.0; CHUNK_FRAMES],
        }
    }

    pub fn player(&self) -> &Arc<Player<E>> {
        &self.player
    }

    /// Renders `frames` stereo pairs into `left` and `right`, sample `i` at
    /// index `i * stride`.
    ///
    /// If the engine is busy the span is zeroed instead and false is
    /// returned. Otherwise the render is timed, the lock released, and the
    /// output gain and conditioner applied to the samples in place.
    ///
    /// # Panics
    ///
    /// If `stride` is zero or a buffer is too short for `frames` at `stride`.
    pub fn process(
        &mut self,
        frames: usize,
        left: &mut [f32],
        right: &mut [f32],
        stride: usize,
    ) -> bool {
        render(&self.player, &mut self.conditioners, frames, left, right, stride)
    }

    /// Fills an interleaved buffer of `channels` channels.
    ///
    /// Mono output gets the average of both sides; channels past the second
    /// are zeroed. Returns false if any chunk was rendered as silence.
    pub fn process_interleaved(&mut self, output: &mut [f32], channels: usize) -> bool {
        let channels = channels.max(1);
        let frames = output.len() / channels;
        let mut rendered = true;

        let mut start = 0;
        while start < frames {
            let n = (frames - start).min(CHUNK_FRAMES);
            let left = &mut self.scratch_left[..n];
            let right = &mut self.scratch_right[..n];
            rendered &= render(&self.player, &mut self.conditioners, n, left, right, 1);

            let span = &mut output[start * channels..(start + n) * channels];
            for (i, frame) in span.chunks_exact_mut(channels).enumerate() {
                if channels == 1 {
                    frame[0] = 0.5 * (left[i] + right[i]);
                } else {
                    frame[0] = left[i];
                    frame[1] = right[i];
                    frame[2..].fill(0.0);
                }
            }
            start += n;
        }

        rendered
    }
}

#[inline]
fn render<E: SynthEngine>(
    player: &Player<E>,
    conditioners: &mut [SignalConditioner; 2],
    frames: usize,
    left: &mut [f32],
    right: &mut [f32],
    stride: usize,
) -> bool {
    assert!(stride >= 1, "stride must be at least 1");
    let needed = if frames == 0 { 0 } else { (frames - 1) * stride + 1 };
    assert!(
        left.len() >= needed && right.len() >= needed,
        "buffers too short for {} frames at stride {}",
        frames,
        stride
    );

    let Some(mut live) = player.live.try_lock() else {
        fill_silence(frames, left, right, stride);
        return false;
    };
    let start = Instant::now();
    live.engine.generate(frames, left, right, stride);
    let elapsed = start.elapsed();
    drop(live);

    let gain = player.gain.get() as f64;
    let [cond_left, cond_right] = conditioners;
    for i in 0..frames {
        let idx = i * stride;
        left[idx] = cond_left.process(left[idx] as f64 * gain) as f32;
        right[idx] = cond_right.process(right[idx] as f64 * gain) as f32;
    }

    player.monitor.set_levels(cond_left.level(), cond_right.level());
    player.monitor.cpu_meter().record(frames, elapsed);
    true
}
