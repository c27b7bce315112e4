//! Error types for loop construction

use thiserror::Error;

/// Result type for loop construction operations
pub type Result<T> = std::result::Result<T, LoopError>;

/// Reasons a loop plan cannot be built for a sample
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// The mix source window runs into the mix destination window
    #[error(
        "the sample is too short for such parameters \
         (mix source ends at frame {src_stop}, mix destination starts at frame {dest_start})"
    )]
    SampleTooShort {
        /// End of the mix source window
        src_stop: usize,
        /// Start of the mix destination window (negative if it falls before the sample start)
        dest_start: i64,
    },

    /// The extra after-loop area would be copied from beyond the loop end
    #[error(
        "extra after-loop area is too wide \
         (extra source ends at frame {extra_stop}, loop ends at frame {dest_stop})"
    )]
    ExtraAreaTooWide {
        /// End of the extra-copy source window
        extra_stop: usize,
        /// End of the loop
        dest_stop: usize,
    },
}

/// Errors that can occur while building a seamless loop
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoopError {
    /// Loop parameters don't fit the sample
    #[error("Invalid loop plan: {0}")]
    InvalidPlan(#[from] PlanError),

    /// Sample width other than 2 or 4 bytes
    #[error("Unsupported sample width: {0} bytes (must be 2 or 4)")]
    UnsupportedSampleWidth(u16),

    /// Format parameters that can't describe a sample
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Raw frame bytes don't match the format parameters
    #[error("Frame data is {actual} bytes, expected {expected} bytes")]
    BufferSizeMismatch {
        /// Byte length implied by the format parameters
        expected: usize,
        /// Byte length actually provided
        actual: usize,
    },

    /// Start fade-in longer than the sample
    #[error("Fade-in of {fade_frames} frames exceeds the sample length of {frame_count} frames")]
    FadeInTooLong {
        /// Requested fade-in length
        fade_frames: usize,
        /// Frames in the sample
        frame_count: usize,
    },

    /// Frame window outside the buffer
    #[error("Frame range {start}..{end} is outside the buffer of {frame_count} frames")]
    FrameRangeOutOfBounds {
        /// First frame of the window
        start: usize,
        /// One past the last frame of the window
        end: usize,
        /// Frames in the buffer
        frame_count: usize,
    },

    /// Loop offset doesn't fit the 32-bit chunk field
    #[error("Loop offset {0} does not fit in a 32-bit chunk field")]
    LoopOffsetOverflow(usize),

    /// Negative or non-finite time parameter
    #[error("Invalid option {name}: {value} (must be a finite, non-negative number of seconds)")]
    InvalidOption {
        /// Option name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Bytes that are not a loop chunk
    #[error("Invalid loop chunk: {0}")]
    InvalidChunk(String),
}

impl LoopError {
    /// Whether the error comes from the loop planner
    pub fn is_invalid_plan(&self) -> bool {
        matches!(self, Self::InvalidPlan(_))
    }
}
