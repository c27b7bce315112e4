//! Wave format parameters

use crate::error::{LoopError, Result};
use std::fmt;

/// Compression type reported for plain PCM
pub const PCM_COMPRESSION_TYPE: &str = "NONE";

/// Compression name reported for plain PCM
pub const PCM_COMPRESSION_NAME: &str = "not compressed";

/// Width of a single sample value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleWidth {
    /// Signed 16-bit samples (2 bytes)
    Int16,
    /// Signed 32-bit samples (4 bytes)
    Int32,
}

impl SampleWidth {
    /// Map a byte width to a sample width
    ///
    /// # Errors
    /// Returns `UnsupportedSampleWidth` for anything other than 2 or 4 bytes
    pub fn from_bytes(bytes: u16) -> Result<Self> {
        match bytes {
            2 => Ok(Self::Int16),
            4 => Ok(Self::Int32),
            other => Err(LoopError::UnsupportedSampleWidth(other)),
        }
    }

    /// Bytes per sample value
    pub fn bytes(self) -> usize {
        match self {
            Self::Int16 => 2,
            Self::Int32 => 4,
        }
    }

    /// Bits per sample value
    pub fn bits(self) -> u16 {
        (self.bytes() * 8) as u16
    }
}

impl fmt::Display for SampleWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Format parameters of a decoded wave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatParams {
    /// Number of interleaved channels
    pub channels: u16,
    /// Width of each sample value
    pub sample_width: SampleWidth,
    /// Frames per second
    pub frame_rate: u32,
    /// Number of frames in the sample
    pub frame_count: usize,
    /// Compression type, passed through untouched
    pub compression_type: String,
    /// Compression name, passed through untouched
    pub compression_name: String,
}

impl FormatParams {
    /// Create format parameters for uncompressed PCM
    pub fn pcm(channels: u16, sample_width: SampleWidth, frame_rate: u32, frame_count: usize) -> Self {
        Self {
            channels,
            sample_width,
            frame_rate,
            frame_count,
            compression_type: PCM_COMPRESSION_TYPE.to_string(),
            compression_name: PCM_COMPRESSION_NAME.to_string(),
        }
    }

    /// Check that the parameters can describe a sample
    ///
    /// # Errors
    /// Returns `InvalidFormat` for zero channels or a zero frame rate
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(LoopError::InvalidFormat(
                "channel count must be at least 1".to_string(),
            ));
        }
        if self.frame_rate == 0 {
            return Err(LoopError::InvalidFormat(
                "frame rate must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Bytes per frame (one sample per channel)
    pub fn frame_size(&self) -> usize {
        usize::from(self.channels) * self.sample_width.bytes()
    }

    /// Byte length of the frame data these parameters describe
    pub fn data_len(&self) -> usize {
        self.frame_count * self.frame_size()
    }

    /// Convert a duration in seconds to whole frames, truncating
    pub fn seconds_to_frames(&self, seconds: f64) -> usize {
        seconds_to_frames(seconds, self.frame_rate)
    }

    /// Copy of these parameters with a different frame count
    pub fn with_frame_count(&self, frame_count: usize) -> Self {
        Self {
            frame_count,
            ..self.clone()
        }
    }
}

/// Convert a duration in seconds to whole frames at `frame_rate`, truncating
///
/// Negative and NaN durations map to 0 frames.
pub fn seconds_to_frames(seconds: f64, frame_rate: u32) -> usize {
    (seconds * f64::from(frame_rate)) as usize
}
