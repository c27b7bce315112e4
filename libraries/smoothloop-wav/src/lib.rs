//! WAV file I/O for smoothloop
//!
//! Reads integer PCM WAV files into the raw frame layout used by
//! `smoothloop-core`, writes processed frames back, and appends the
//! `smpl` loop chunk after the audio data.
//!
//! ```text
//! input.wav ──► read_wave ──► LoopPipeline ──► write_looped_wave ──► output.wav
//!                                                    │
//!                                              append_chunk (smpl)
//! ```

#![deny(unsafe_code)]

mod error;
mod reader;
mod riff;
mod writer;

pub use error::{Result, WavError};
pub use reader::{decode, read_wave, WaveData};
pub use riff::{append_chunk, find_chunk, read_loop_chunk};
pub use writer::{write_looped_wave, write_wave};
