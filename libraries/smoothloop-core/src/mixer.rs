//! Cosine crossfade mixing
//!
//! Weights come from a raised-cosine "slider": row `i` of an `n`-frame slider
//! running from `a` to `b` is `(cos(a + i * (b - a) / n) + 1) / 2`, repeated
//! for every channel. Running from π to 2π gives a fade-in (0 → 1), running
//! from 0 to π gives the matching fade-out (1 → 0).
//!
//! The curve is the same for every channel count. It is not exactly
//! constant-power; the two ramps sum to unity gain instead.

use crate::buffer::SampleBuffer;
use crate::error::{LoopError, Result};
use crate::planner::LoopPlan;
use std::f64::consts::PI;
use tracing::debug;

/// Build an interleaved `length × channels` raised-cosine weight matrix
pub fn cosine_slider(start: f64, stop: f64, length: usize, channels: usize) -> Vec<f64> {
    if length == 0 {
        return Vec::new();
    }

    let step = (stop - start) / length as f64;
    let mut slider = Vec::with_capacity(length * channels);
    for i in 0..length {
        let weight = ((start + i as f64 * step).cos() + 1.0) / 2.0;
        slider.extend(std::iter::repeat(weight).take(channels));
    }
    slider
}

/// Rising weights (0 → 1) for `length` frames
pub fn fade_in_slider(length: usize, channels: usize) -> Vec<f64> {
    cosine_slider(PI, 2.0 * PI, length, channels)
}

/// Falling weights (1 → 0) for `length` frames
pub fn fade_out_slider(length: usize, channels: usize) -> Vec<f64> {
    cosine_slider(0.0, PI, length, channels)
}

/// Applies loop crossfades and fades to a [`SampleBuffer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossfadeMixer;

impl CrossfadeMixer {
    /// Create a mixer
    pub fn new() -> Self {
        Self
    }

    /// Blend the mix source window into the mix destination window
    ///
    /// Frames in `plan.dest_start..plan.dest_stop` fade out while the frames
    /// in `plan.src_start..plan.src_stop` fade in on top of them. All other
    /// frames are left alone.
    ///
    /// # Errors
    /// Returns `FrameRangeOutOfBounds` if the plan doesn't fit the buffer
    pub fn mix(&self, buffer: &mut SampleBuffer, plan: &LoopPlan) -> Result<()> {
        let channels = buffer.channels();
        let fade_in = fade_in_slider(plan.mix_length, channels);
        let fade_out = fade_out_slider(plan.mix_length, channels);

        buffer.blend(plan.src_start, plan.dest_start, &fade_in, &fade_out)?;

        debug!(
            src_start = plan.src_start,
            "Crossfade-loop mix source starts at {}",
            plan.src_start
        );
        debug!(
            loop_start = plan.src_stop,
            loop_stop = plan.dest_stop,
            loop_length = plan.loop_length(),
            "Loop encloses area: {} to {} (length: {})",
            plan.src_stop,
            plan.dest_stop,
            plan.loop_length()
        );
        Ok(())
    }

    /// Trim the buffer to the loop end and append the extra after-loop area
    ///
    /// The extra area is a copy of the frames that directly follow the mix
    /// source window. Returns whether the buffer changed length.
    ///
    /// # Errors
    /// Returns `FrameRangeOutOfBounds` if the plan doesn't fit the buffer
    pub fn resize(&self, buffer: &mut SampleBuffer, plan: &LoopPlan) -> Result<bool> {
        let old_frame_count = buffer.frame_count();
        let resized = plan.new_frame_count != old_frame_count;
        if resized {
            buffer.resize(plan.new_frame_count);
            debug!(
                from = old_frame_count,
                to = plan.new_frame_count,
                "Wave resized from {} to {}",
                old_frame_count,
                plan.new_frame_count
            );
        } else {
            debug!("Wave not resized");
        }

        debug!(cut = plan.cut_length, "{} samples cut", plan.cut_length);
        if plan.extra_length > 0 {
            let extra_src = plan.src_stop..plan.src_stop + plan.extra_length;
            buffer.copy_frames_within(extra_src, plan.dest_stop)?;
        }
        debug!(extra = plan.extra_length, "{} extra samples", plan.extra_length);

        Ok(resized)
    }

    /// Fade in the first `length` frames of the buffer
    ///
    /// # Errors
    /// Returns `FadeInTooLong` if the buffer is shorter than `length` frames
    pub fn fade_in_start(&self, buffer: &mut SampleBuffer, length: usize) -> Result<()> {
        let frame_count = buffer.frame_count();
        if length > frame_count {
            return Err(LoopError::FadeInTooLong {
                fade_frames: length,
                frame_count,
            });
        }

        let fade_in = fade_in_slider(length, buffer.channels());
        buffer.apply_gain(0, &fade_in)?;
        debug!(fade_in = length, "Wave fade-in length: {}", length);
        Ok(())
    }
}
