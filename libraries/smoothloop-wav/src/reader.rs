//! WAV decoding into raw frames

use crate::error::{Result, WavError};
use smoothloop_core::{FormatParams, SampleWidth};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Decoded frames of a WAV file with their format
#[derive(Debug, Clone, PartialEq)]
pub struct WaveData {
    /// Interleaved little-endian frame bytes
    pub frames: Vec<u8>,
    /// Format of the frames
    pub format: FormatParams,
}

/// Read a WAV file into raw frame bytes
///
/// Only integer PCM with 16 or 32 bits per sample is accepted.
///
/// # Errors
/// Returns `UnsupportedFormat` for float samples, `Core(UnsupportedSampleWidth)`
/// for other widths, or the underlying decoder error
pub fn read_wave<P: AsRef<Path>>(path: P) -> Result<WaveData> {
    let reader = hound::WavReader::open(path.as_ref())?;
    decode(reader)
}

/// Decode a WAV stream into raw frame bytes
///
/// # Errors
/// See [`read_wave`]
pub fn decode<R: Read>(reader: hound::WavReader<R>) -> Result<WaveData> {
    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int {
        return Err(WavError::UnsupportedFormat(
            "floating point samples".to_string(),
        ));
    }
    if spec.bits_per_sample % 8 != 0 {
        return Err(WavError::UnsupportedFormat(format!(
            "{} bits per sample",
            spec.bits_per_sample
        )));
    }

    let sample_width = SampleWidth::from_bytes(spec.bits_per_sample / 8)?;
    let frame_count = reader.duration() as usize;
    let format = FormatParams::pcm(spec.channels, sample_width, spec.sample_rate, frame_count);
    format.validate()?;

    let mut frames = Vec::with_capacity(format.data_len());
    match sample_width {
        SampleWidth::Int16 => {
            for sample in reader.into_samples::<i16>() {
                frames.extend_from_slice(&sample?.to_le_bytes());
            }
        }
        SampleWidth::Int32 => {
            for sample in reader.into_samples::<i32>() {
                frames.extend_from_slice(&sample?.to_le_bytes());
            }
        }
    }

    if frames.len() != format.data_len() {
        return Err(WavError::Malformed(format!(
            "data chunk holds {} bytes, header announces {}",
            frames.len(),
            format.data_len()
        )));
    }

    debug!(
        channels = format.channels,
        sample_width = %format.sample_width,
        frame_rate = format.frame_rate,
        frame_count = format.frame_count,
        "Wave decoded"
    );
    Ok(WaveData { frames, format })
}
