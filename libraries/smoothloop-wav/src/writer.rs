//! WAV encoding of processed frames

use crate::error::Result;
use crate::riff::append_chunk;
use smoothloop_core::{FormatParams, ProcessedSample, SampleBuffer, SampleSlice};
use std::path::Path;
use tracing::debug;

/// Write raw frame bytes as a WAV file
///
/// # Errors
/// Returns `Core` if the bytes don't match `format`, or the encoder error
pub fn write_wave<P: AsRef<Path>>(path: P, frames: &[u8], format: &FormatParams) -> Result<()> {
    let buffer = SampleBuffer::from_bytes(frames, format)?;
    let spec = hound::WavSpec {
        channels: format.channels,
        sample_rate: format.frame_rate,
        bits_per_sample: format.sample_width.bits(),
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    match buffer.samples() {
        SampleSlice::I16(samples) => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
        SampleSlice::I32(samples) => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}

/// Write a processed sample and append its loop chunk
///
/// # Errors
/// Returns the first error of writing the audio or appending the chunk
pub fn write_looped_wave<P: AsRef<Path>>(path: P, sample: &ProcessedSample) -> Result<()> {
    let path = path.as_ref();
    write_wave(path, &sample.frames, &sample.format)?;

    debug!("Appending a chunk with loop-information...");
    append_chunk(path, &sample.chunk)?;
    Ok(())
}
