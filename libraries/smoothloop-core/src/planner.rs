//! Loop region planning
//!
//! Turns the time-domain loop parameters into frame offsets for one sample:
//!
//! ```text
//!  0      src_start   src_stop        dest_start   dest_stop   frame_count
//!  |----------|==mix==|-------------------|==mix==|----cut----|
//!                     ^ loop start                ^ loop end
//!                     |--extra--|  copied to  ----|--extra--|
//! ```
//!
//! The loop plays from `src_stop` to `dest_stop`. The window before the loop
//! end is crossfaded with the window before the loop start, so jumping back
//! from the end lands on the same material.

use crate::error::{PlanError, Result};
use crate::format::FormatParams;
use crate::pipeline::LoopOptions;

/// Frame offsets for building one loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPlan {
    /// Length of the crossfade, in frames
    pub mix_length: usize,
    /// First frame of the mix source window
    pub src_start: usize,
    /// One past the mix source window; the loop start
    pub src_stop: usize,
    /// First frame of the mix destination window
    pub dest_start: usize,
    /// One past the mix destination window; the loop end
    pub dest_stop: usize,
    /// Frames dropped from the end of the sample
    pub cut_length: usize,
    /// Frames appended after the loop end
    pub extra_length: usize,
    /// Frame count of the sample before processing
    pub original_frame_count: usize,
    /// Frame count of the processed sample
    pub new_frame_count: usize,
}

impl LoopPlan {
    /// Plan a loop from durations in seconds
    ///
    /// # Arguments
    /// * `format` - Format of the sample to loop
    /// * `cf_source` - Start of the crossfade source window
    /// * `cf_length` - Length of the crossfade
    /// * `cf_cut` - Distance between the loop end and the sample end
    /// * `cf_extra` - Length of the area appended after the loop end
    ///
    /// # Errors
    /// Returns `InvalidPlan` if the windows don't fit inside the sample
    pub fn compute(
        format: &FormatParams,
        cf_source: f64,
        cf_length: f64,
        cf_cut: f64,
        cf_extra: f64,
    ) -> Result<Self> {
        let frame_count = format.frame_count;

        let mix_length = format.seconds_to_frames(cf_length);
        let src_start = format.seconds_to_frames(cf_source);
        let cut_length = format.seconds_to_frames(cf_cut);

        let too_short = || PlanError::SampleTooShort {
            src_stop: src_start.saturating_add(mix_length),
            dest_start: to_i64(frame_count)
                .saturating_sub(to_i64(cut_length))
                .saturating_sub(to_i64(mix_length)),
        };
        let src_stop = src_start.checked_add(mix_length).ok_or_else(too_short)?;
        let dest_stop = frame_count.checked_sub(cut_length).ok_or_else(too_short)?;
        let dest_start = dest_stop.checked_sub(mix_length).ok_or_else(too_short)?;
        if src_stop > dest_start {
            return Err(too_short().into());
        }

        let extra_length = format.seconds_to_frames(cf_extra);
        let too_wide = || PlanError::ExtraAreaTooWide {
            extra_stop: src_stop.saturating_add(extra_length),
            dest_stop,
        };
        let extra_stop = src_stop.checked_add(extra_length).ok_or_else(too_wide)?;
        if extra_stop > dest_stop {
            return Err(too_wide().into());
        }
        let new_frame_count = dest_stop.checked_add(extra_length).ok_or_else(too_wide)?;

        Ok(Self {
            mix_length,
            src_start,
            src_stop,
            dest_start,
            dest_stop,
            cut_length,
            extra_length,
            original_frame_count: frame_count,
            new_frame_count,
        })
    }

    /// Plan a loop from a set of loop options
    ///
    /// # Errors
    /// Returns `InvalidPlan` if the windows don't fit inside the sample
    pub fn from_options(format: &FormatParams, options: &LoopOptions) -> Result<Self> {
        Self::compute(
            format,
            options.cf_source,
            options.cf_length,
            options.cf_cut,
            options.cf_extra,
        )
    }

    /// First frame of the loop
    pub fn loop_start(&self) -> usize {
        self.src_stop
    }

    /// One past the last frame of the loop
    pub fn loop_stop(&self) -> usize {
        self.dest_stop
    }

    /// Frames enclosed by the loop
    pub fn loop_length(&self) -> usize {
        self.dest_stop - self.src_stop
    }
}

fn to_i64(frames: usize) -> i64 {
    i64::try_from(frames).unwrap_or(i64::MAX)
}
