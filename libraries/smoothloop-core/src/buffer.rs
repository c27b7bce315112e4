//! In-memory sample storage
//!
//! A [`SampleBuffer`] holds every frame of a decoded wave as interleaved
//! integer samples. The element type follows the wave's sample width; all
//! arithmetic goes through [`PcmSample`] so the mixing code is written once
//! for both widths.
//!
//! Views into the buffer ([`SampleSlice`]) borrow it immutably, and every
//! mutating operation (including [`SampleBuffer::resize`]) takes `&mut self`,
//! so a view taken before a resize can never be used after it.

use crate::error::{LoopError, Result};
use crate::format::{FormatParams, SampleWidth};
use std::ops::Range;

/// Integer PCM sample type
pub trait PcmSample: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Width tag of this sample type
    const WIDTH: SampleWidth;

    /// Decode one sample from little-endian bytes (`bytes.len() == WIDTH.bytes()`)
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Append the little-endian encoding of this sample
    fn extend_le(self, out: &mut Vec<u8>);

    /// Widen to floating point for gain arithmetic
    fn to_f64(self) -> f64;

    /// Narrow from floating point, truncating toward zero and saturating at the type bounds
    fn from_f64(value: f64) -> Self;
}

impl PcmSample for i16 {
    const WIDTH: SampleWidth = SampleWidth::Int16;

    #[inline]
    fn from_le_slice(bytes: &[u8]) -> Self {
        i16::from_le_bytes([bytes[0], bytes[1]])
    }

    #[inline]
    fn extend_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as i16
    }
}

impl PcmSample for i32 {
    const WIDTH: SampleWidth = SampleWidth::Int32;

    #[inline]
    fn from_le_slice(bytes: &[u8]) -> Self {
        i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn extend_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as i32
    }
}

/// Owned interleaved samples, tagged by width
#[derive(Debug, Clone, PartialEq)]
enum SampleData {
    /// 16-bit samples
    I16(Vec<i16>),
    /// 32-bit samples
    I32(Vec<i32>),
}

/// Borrowed interleaved samples, tagged by width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleSlice<'a> {
    /// 16-bit samples
    I16(&'a [i16]),
    /// 32-bit samples
    I32(&'a [i32]),
}

impl SampleSlice<'_> {
    /// Number of individual sample values
    pub fn len(&self) -> usize {
        match self {
            Self::I16(s) => s.len(),
            Self::I32(s) => s.len(),
        }
    }

    /// Whether the slice holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All samples widened to `i32`
    pub fn to_vec_i32(&self) -> Vec<i32> {
        match self {
            Self::I16(s) => s.iter().map(|&v| i32::from(v)).collect(),
            Self::I32(s) => s.to_vec(),
        }
    }
}

/// Decoded frames of a wave, held entirely in memory
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    data: SampleData,
    channels: usize,
}

impl SampleBuffer {
    /// Decode raw little-endian frame bytes according to `format`
    ///
    /// # Errors
    /// Returns `InvalidFormat` for unusable parameters and `BufferSizeMismatch`
    /// if `bytes` doesn't hold exactly `format.frame_count` frames
    pub fn from_bytes(bytes: &[u8], format: &FormatParams) -> Result<Self> {
        format.validate()?;

        let expected = format.data_len();
        if bytes.len() != expected {
            return Err(LoopError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let data = match format.sample_width {
            SampleWidth::Int16 => SampleData::I16(decode_le(bytes)),
            SampleWidth::Int32 => SampleData::I32(decode_le(bytes)),
        };

        Ok(Self {
            data,
            channels: usize::from(format.channels),
        })
    }

    /// Build a 16-bit buffer from interleaved samples
    ///
    /// # Errors
    /// Returns `InvalidFormat` if `channels` is 0 or doesn't divide the sample count
    pub fn from_i16(channels: usize, samples: Vec<i16>) -> Result<Self> {
        check_shape(channels, samples.len())?;
        Ok(Self {
            data: SampleData::I16(samples),
            channels,
        })
    }

    /// Build a 32-bit buffer from interleaved samples
    ///
    /// # Errors
    /// Returns `InvalidFormat` if `channels` is 0 or doesn't divide the sample count
    pub fn from_i32(channels: usize, samples: Vec<i32>) -> Result<Self> {
        check_shape(channels, samples.len())?;
        Ok(Self {
            data: SampleData::I32(samples),
            channels,
        })
    }

    /// Number of channels per frame
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.sample_count() / self.channels
    }

    /// Width of the stored samples
    pub fn sample_width(&self) -> SampleWidth {
        match self.data {
            SampleData::I16(_) => SampleWidth::Int16,
            SampleData::I32(_) => SampleWidth::Int32,
        }
    }

    fn sample_count(&self) -> usize {
        match &self.data {
            SampleData::I16(s) => s.len(),
            SampleData::I32(s) => s.len(),
        }
    }

    /// All samples
    pub fn samples(&self) -> SampleSlice<'_> {
        match &self.data {
            SampleData::I16(s) => SampleSlice::I16(s),
            SampleData::I32(s) => SampleSlice::I32(s),
        }
    }

    /// Samples of the frames in `frames`
    ///
    /// # Errors
    /// Returns `FrameRangeOutOfBounds` if the range leaves the buffer
    pub fn window(&self, frames: Range<usize>) -> Result<SampleSlice<'_>> {
        let samples = self.sample_range(&frames)?;
        Ok(match &self.data {
            SampleData::I16(s) => SampleSlice::I16(&s[samples]),
            SampleData::I32(s) => SampleSlice::I32(&s[samples]),
        })
    }

    /// Resize in place to `frame_count` frames
    ///
    /// Growing appends silent frames, shrinking drops trailing frames.
    pub fn resize(&mut self, frame_count: usize) {
        let len = frame_count * self.channels;
        match &mut self.data {
            SampleData::I16(s) => s.resize(len, 0),
            SampleData::I32(s) => s.resize(len, 0),
        }
    }

    /// Copy the frames in `src` so they start at frame `dest_start`
    ///
    /// Overlapping windows are handled like `memmove`.
    ///
    /// # Errors
    /// Returns `FrameRangeOutOfBounds` if either window leaves the buffer
    pub fn copy_frames_within(&mut self, src: Range<usize>, dest_start: usize) -> Result<()> {
        let src_samples = self.sample_range(&src)?;
        let dest = dest_start..dest_start.saturating_add(src.len());
        self.sample_range(&dest)?;

        let dest_sample = dest_start * self.channels;
        match &mut self.data {
            SampleData::I16(s) => s.copy_within(src_samples, dest_sample),
            SampleData::I32(s) => s.copy_within(src_samples, dest_sample),
        }
        Ok(())
    }

    /// Multiply frames starting at `start_frame` by per-sample gains
    ///
    /// `gains` is interleaved like the buffer; its length decides how many
    /// frames are touched.
    ///
    /// # Errors
    /// Returns `FrameRangeOutOfBounds` if the gains reach past the buffer end
    pub fn apply_gain(&mut self, start_frame: usize, gains: &[f64]) -> Result<()> {
        let frames = start_frame..start_frame.saturating_add(gains.len() / self.channels);
        let range = self.sample_range(&frames)?;
        match &mut self.data {
            SampleData::I16(s) => apply_gain_in_place(&mut s[range], gains),
            SampleData::I32(s) => apply_gain_in_place(&mut s[range], gains),
        }
        Ok(())
    }

    /// Crossfade the frames at `src_start` into the frames at `dest_start`
    ///
    /// Each destination sample becomes `dest * fade_out + src * fade_in`. The
    /// faded source is taken before the destination is written, so the two
    /// windows may overlap.
    ///
    /// # Errors
    /// Returns `FrameRangeOutOfBounds` if either window leaves the buffer
    pub fn blend(
        &mut self,
        src_start: usize,
        dest_start: usize,
        fade_in: &[f64],
        fade_out: &[f64],
    ) -> Result<()> {
        let frames = fade_in.len().min(fade_out.len()) / self.channels;
        let src = self.sample_range(&(src_start..src_start.saturating_add(frames)))?;
        let dest = self.sample_range(&(dest_start..dest_start.saturating_add(frames)))?;
        match &mut self.data {
            SampleData::I16(s) => blend_in_place(s, src, dest, fade_in, fade_out),
            SampleData::I32(s) => blend_in_place(s, src, dest, fade_in, fade_out),
        }
        Ok(())
    }

    /// Serialize to raw little-endian frame bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.data {
            SampleData::I16(s) => encode_le(s),
            SampleData::I32(s) => encode_le(s),
        }
    }

    fn sample_range(&self, frames: &Range<usize>) -> Result<Range<usize>> {
        let frame_count = self.frame_count();
        if frames.start > frames.end || frames.end > frame_count {
            return Err(LoopError::FrameRangeOutOfBounds {
                start: frames.start,
                end: frames.end,
                frame_count,
            });
        }
        Ok(frames.start * self.channels..frames.end * self.channels)
    }
}

fn check_shape(channels: usize, len: usize) -> Result<()> {
    if channels == 0 {
        return Err(LoopError::InvalidFormat(
            "channel count must be at least 1".to_string(),
        ));
    }
    if len % channels != 0 {
        return Err(LoopError::InvalidFormat(format!(
            "{len} samples do not divide into frames of {channels} channels"
        )));
    }
    Ok(())
}

fn decode_le<T: PcmSample>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(T::WIDTH.bytes())
        .map(T::from_le_slice)
        .collect()
}

fn encode_le<T: PcmSample>(samples: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * T::WIDTH.bytes());
    for &sample in samples {
        sample.extend_le(&mut out);
    }
    out
}

fn apply_gain_in_place<T: PcmSample>(samples: &mut [T], gains: &[f64]) {
    for (sample, &gain) in samples.iter_mut().zip(gains) {
        *sample = T::from_f64(sample.to_f64() * gain);
    }
}

fn blend_in_place<T: PcmSample>(
    samples: &mut [T],
    src: Range<usize>,
    dest: Range<usize>,
    fade_in: &[f64],
    fade_out: &[f64],
) {
    let faded_src: Vec<f64> = samples[src]
        .iter()
        .zip(fade_in)
        .map(|(&s, &gain)| s.to_f64() * gain)
        .collect();

    for ((sample, &out_gain), &incoming) in samples[dest].iter_mut().zip(fade_out).zip(&faded_src) {
        // Faded destination is narrowed before the source is added
        let faded_dest = T::from_f64(sample.to_f64() * out_gain);
        *sample = T::from_f64(faded_dest.to_f64() + incoming);
    }
}
