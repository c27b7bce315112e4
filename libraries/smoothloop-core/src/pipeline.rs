//! End-to-end loop construction for one sample
//!
//! ```text
//! raw bytes ──► decode ──► plan ──► mix ──► resize ──► fade in ──► encode
//!                           │                                       │
//!                           └──────────── loop chunk ◄──────────────┘
//! ```
//!
//! Nothing in the buffer is touched until a valid plan exists, so a planning
//! failure leaves the caller's data exactly as it was.

use crate::buffer::SampleBuffer;
use crate::chunk::{LoopChunk, LOOP_CHUNK_LEN};
use crate::error::{LoopError, Result};
use crate::format::FormatParams;
use crate::mixer::CrossfadeMixer;
use crate::planner::LoopPlan;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Time parameters of a loop, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopOptions {
    /// Beginning of the crossfade source area
    pub cf_source: f64,
    /// Crossfade length
    pub cf_length: f64,
    /// Interval between the loop end and the wave end
    pub cf_cut: f64,
    /// Length of the area added after the loop end
    pub cf_extra: f64,
    /// Length of the fade-in at the very start of the wave
    pub wave_fade_in: f64,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            cf_source: 1.0,
            cf_length: 1.5,
            cf_cut: 0.1,
            cf_extra: 0.1,
            wave_fade_in: 0.0005,
        }
    }
}

impl LoopOptions {
    /// Check that every duration is a finite, non-negative number
    ///
    /// # Errors
    /// Returns `InvalidOption` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("cf_source", self.cf_source),
            ("cf_length", self.cf_length),
            ("cf_cut", self.cf_cut),
            ("cf_extra", self.cf_extra),
            ("wave_fade_in", self.wave_fade_in),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LoopError::InvalidOption { name, value });
            }
        }
        Ok(())
    }
}

/// Output of the loop pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSample {
    /// Processed frames as raw little-endian bytes
    pub frames: Vec<u8>,
    /// Encoded `smpl` chunk to append after the audio data
    pub chunk: [u8; LOOP_CHUNK_LEN],
    /// Loop points carried by the chunk
    pub loop_chunk: LoopChunk,
    /// Format of the processed frames
    pub format: FormatParams,
    /// Plan the sample was processed with
    pub plan: LoopPlan,
    /// Whether the frame count changed
    pub resized: bool,
}

/// Builds seamless loops with a fixed set of options
#[derive(Debug, Clone)]
pub struct LoopPipeline {
    options: LoopOptions,
    mixer: CrossfadeMixer,
}

impl LoopPipeline {
    /// Create a pipeline
    ///
    /// # Errors
    /// Returns `InvalidOption` if any duration is negative or not finite
    pub fn new(options: LoopOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            mixer: CrossfadeMixer::new(),
        })
    }

    /// Process one sample
    ///
    /// # Errors
    /// Returns the first error of any step; `InvalidPlan` is raised before
    /// any sample is modified
    pub fn process(&self, raw_frames: &[u8], format: &FormatParams) -> Result<ProcessedSample> {
        let mut buffer = SampleBuffer::from_bytes(raw_frames, format)?;
        let plan = LoopPlan::from_options(format, &self.options)?;
        // Chunk offsets are checked before the buffer is touched
        let loop_chunk = LoopChunk::from_plan(&plan)?;

        self.mixer.mix(&mut buffer, &plan)?;
        let resized = self.mixer.resize(&mut buffer, &plan)?;

        let fade_in_frames = format.seconds_to_frames(self.options.wave_fade_in);
        self.mixer.fade_in_start(&mut buffer, fade_in_frames)?;

        let frames = buffer.to_bytes();
        debug!(
            bytes = frames.len(),
            frames = plan.new_frame_count,
            "Sample processed"
        );

        Ok(ProcessedSample {
            frames,
            chunk: loop_chunk.encode(),
            loop_chunk,
            format: format.with_frame_count(plan.new_frame_count),
            plan,
            resized,
        })
    }
}

/// Process one sample with the given options
///
/// # Errors
/// See [`LoopPipeline::process`]
pub fn process(
    raw_frames: &[u8],
    format: &FormatParams,
    options: &LoopOptions,
) -> Result<ProcessedSample> {
    LoopPipeline::new(*options)?.process(raw_frames, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SampleWidth;

    fn options(cf_source: f64, cf_length: f64, cf_cut: f64, cf_extra: f64) -> LoopOptions {
        LoopOptions {
            cf_source,
            cf_length,
            cf_cut,
            cf_extra,
            wave_fade_in: 0.0,
        }
    }

    #[test]
    fn test_default_options() {
        let options = LoopOptions::default();
        assert_eq!(options.cf_source, 1.0);
        assert_eq!(options.cf_length, 1.5);
        assert_eq!(options.cf_cut, 0.1);
        assert_eq!(options.cf_extra, 0.1);
        assert_eq!(options.wave_fade_in, 0.0005);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let mut options = LoopOptions::default();
        options.cf_cut = -0.1;
        assert_eq!(
            options.validate(),
            Err(LoopError::InvalidOption {
                name: "cf_cut",
                value: -0.1
            })
        );

        let mut options = LoopOptions::default();
        options.wave_fade_in = f64::NAN;
        assert!(LoopPipeline::new(options).is_err());
    }

    #[test]
    fn test_process_reference_scenario() {
        let format = FormatParams::pcm(1, SampleWidth::Int16, 1000, 10_000);
        let raw = vec![0u8; format.data_len()];

        let result = process(&raw, &format, &options(1.0, 2.0, 0.5, 1.0)).unwrap();

        assert_eq!(result.format.frame_count, 10_500);
        assert_eq!(result.frames.len(), 10_500 * 2);
        assert!(result.resized);
        assert_eq!(result.loop_chunk.loop_start, 3000);
        assert_eq!(result.loop_chunk.loop_stop, 9500);
        assert_eq!(LoopChunk::parse(&result.chunk).unwrap(), result.loop_chunk);
    }

    #[test]
    fn test_process_plan_failure_propagates() {
        let format = FormatParams::pcm(1, SampleWidth::Int16, 1000, 10_000);
        let raw = vec![0u8; format.data_len()];

        let err = process(&raw, &format, &options(8.0, 2.0, 0.1, 0.0)).unwrap_err();
        assert!(err.is_invalid_plan());
    }

    #[test]
    fn test_process_rejects_mismatched_bytes() {
        let format = FormatParams::pcm(2, SampleWidth::Int16, 1000, 100);
        let err = process(&[0u8; 10], &format, &options(0.0, 0.01, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, LoopError::BufferSizeMismatch { .. }));
    }

    #[test]
    fn test_process_keeps_pass_through_fields() {
        let mut format = FormatParams::pcm(2, SampleWidth::Int32, 100, 1000);
        format.compression_type = "XYZ".to_string();
        format.compression_name = "custom".to_string();
        let raw = vec![0u8; format.data_len()];

        let result = process(&raw, &format, &options(1.0, 1.0, 1.0, 0.0)).unwrap();

        assert_eq!(result.format.compression_type, "XYZ");
        assert_eq!(result.format.compression_name, "custom");
        assert_eq!(result.format.frame_count, 900);
        assert_eq!(result.frames.len(), 900 * 8);
    }

    #[test]
    fn test_process_fade_in_too_long() {
        let format = FormatParams::pcm(1, SampleWidth::Int16, 1000, 1000);
        let raw = vec![0u8; format.data_len()];
        let options = LoopOptions {
            wave_fade_in: 2.0,
            ..options(0.0, 0.1, 0.1, 0.0)
        };

        let err = process(&raw, &format, &options).unwrap_err();
        assert!(matches!(err, LoopError::FadeInTooLong { .. }));
    }

    #[test]
    fn test_process_huge_durations_fail_before_mixing() {
        let format = FormatParams::pcm(1, SampleWidth::Int16, 1000, 10_000);
        let raw = vec![0u8; format.data_len()];

        for (source, length, cut, extra) in [
            (1e30, 2.0, 0.5, 0.1),
            (1.0, 1e30, 0.5, 0.1),
            (1.0, 2.0, 1e30, 0.1),
            (1.0, 2.0, 0.5, 1e30),
        ] {
            let err = process(&raw, &format, &options(source, length, cut, extra)).unwrap_err();
            assert!(err.is_invalid_plan(), "unexpected error {err}");
        }
    }

    #[test]
    fn test_process_huge_fade_in() {
        let format = FormatParams::pcm(1, SampleWidth::Int16, 1000, 10_000);
        let raw = vec![0u8; format.data_len()];
        let options = LoopOptions {
            wave_fade_in: 1e30,
            ..options(1.0, 2.0, 0.5, 0.1)
        };

        let err = process(&raw, &format, &options).unwrap_err();
        assert_eq!(
            err,
            LoopError::FadeInTooLong {
                fade_frames: usize::MAX,
                frame_count: 9600,
            }
        );
    }
}
