//! Seamless loop construction for integer PCM samples
//!
//! This crate provides:
//! - Loop planning from crossfade times in seconds
//! - Cosine crossfade of the sample tail into the loop start
//! - Trimming, extra after-loop material and a start fade-in
//! - Encoding of the loop points as a RIFF `smpl` chunk
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Raw frames  │ ──► │ SampleBuffer │ ──► │ CrossfadeMixer│
//! └─────────────┘     └──────────────┘     └───────────────┘
//!                            ▲                      │
//!                     ┌──────────────┐              ▼
//!                     │ LoopPlan     │ ──► ┌───────────────┐
//!                     └──────────────┘     │ LoopChunk     │
//!                                          └───────────────┘
//! ```
//!
//! The crate does no file I/O. Diagnostics are emitted as `tracing` events;
//! installing a subscriber is up to the application.
//!
//! # Example
//!
//! ```
//! use smoothloop_core::{process, FormatParams, LoopOptions, SampleWidth};
//!
//! let format = FormatParams::pcm(1, SampleWidth::Int16, 1000, 10_000);
//! let raw = vec![0u8; format.data_len()];
//! let options = LoopOptions {
//!     cf_source: 1.0,
//!     cf_length: 2.0,
//!     cf_cut: 0.5,
//!     cf_extra: 1.0,
//!     wave_fade_in: 0.0,
//! };
//!
//! let result = process(&raw, &format, &options)?;
//! assert_eq!(result.format.frame_count, 10_500);
//! assert_eq!(result.loop_chunk.loop_start, 3000);
//! assert_eq!(result.loop_chunk.loop_stop, 9500);
//! # Ok::<(), smoothloop_core::LoopError>(())
//! ```

#![deny(unsafe_code)]

mod buffer;
mod chunk;
mod error;
mod format;
mod mixer;
mod pipeline;
mod planner;

pub use buffer::{PcmSample, SampleBuffer, SampleSlice};
pub use chunk::{encode, LoopChunk, LOOP_CHUNK_ID, LOOP_CHUNK_LEN};
pub use error::{LoopError, PlanError, Result};
pub use format::{
    seconds_to_frames, FormatParams, SampleWidth, PCM_COMPRESSION_NAME, PCM_COMPRESSION_TYPE,
};
pub use mixer::{cosine_slider, fade_in_slider, fade_out_slider, CrossfadeMixer};
pub use pipeline::{process, LoopOptions, LoopPipeline, ProcessedSample};
pub use planner::LoopPlan;
