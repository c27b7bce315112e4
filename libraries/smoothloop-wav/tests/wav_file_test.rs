//! WAV file tests against real files on disk

use smoothloop_core::{FormatParams, LoopOptions, LoopPipeline, SampleWidth, LOOP_CHUNK_LEN};
use smoothloop_wav::{read_loop_chunk, read_wave, write_looped_wave, write_wave, WavError};
use std::path::Path;
use tempfile::TempDir;

// ========== Helper Functions ==========

fn write_test_wav_i16(path: &Path, channels: u16, frame_rate: u32, frames: usize) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: frame_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let t = i as f32 / frame_rate as f32;
        let value = (12000.0 * (2.0 * std::f32::consts::PI * 3.0 * t).sin()) as i16;
        for _ in 0..channels {
            writer.write_sample(value).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn riff_size(path: &Path) -> u32 {
    let bytes = std::fs::read(path).unwrap();
    u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]])
}

// ========== Reading ==========

#[test]
fn test_read_wave_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.wav");
    write_test_wav_i16(&path, 2, 8000, 1234);

    let wave = read_wave(&path).unwrap();

    assert_eq!(wave.format.channels, 2);
    assert_eq!(wave.format.sample_width, SampleWidth::Int16);
    assert_eq!(wave.format.frame_rate, 8000);
    assert_eq!(wave.format.frame_count, 1234);
    assert_eq!(wave.frames.len(), 1234 * 2 * 2);
}

#[test]
fn test_read_rejects_24_bit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deep.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 24,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..100 {
        writer.write_sample(i * 100).unwrap();
    }
    writer.finalize().unwrap();

    let err = read_wave(&path).unwrap_err();
    assert!(matches!(err, WavError::Core(_)), "unexpected error {err}");
}

#[test]
fn test_read_rejects_float() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("float.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for _ in 0..100 {
        writer.write_sample(0.25_f32).unwrap();
    }
    writer.finalize().unwrap();

    assert!(matches!(
        read_wave(&path),
        Err(WavError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(read_wave(dir.path().join("missing.wav")).is_err());
}

// ========== Writing ==========

#[test]
fn test_write_then_read_preserves_frames() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.wav");
    let format = FormatParams::pcm(2, SampleWidth::Int32, 44100, 3);
    let frames: Vec<u8> = [1_i32, -1, 70_000, -70_000, i32::MAX, i32::MIN]
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect();

    write_wave(&path, &frames, &format).unwrap();
    let wave = read_wave(&path).unwrap();

    assert_eq!(wave.format, format);
    assert_eq!(wave.frames, frames);
}

#[test]
fn test_write_rejects_mismatched_length() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.wav");
    let format = FormatParams::pcm(1, SampleWidth::Int16, 8000, 10);

    assert!(write_wave(&path, &[0u8; 7], &format).is_err());
}

#[test]
fn test_looped_wave_carries_loop_chunk() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.wav");
    let output = dir.path().join("input.L.wav");
    write_test_wav_i16(&input, 1, 1000, 10_000);

    let wave = read_wave(&input).unwrap();
    let options = LoopOptions {
        cf_source: 1.0,
        cf_length: 2.0,
        cf_cut: 0.5,
        cf_extra: 1.0,
        wave_fade_in: 0.0,
    };
    let processed = LoopPipeline::new(options)
        .unwrap()
        .process(&wave.frames, &wave.format)
        .unwrap();
    write_looped_wave(&output, &processed).unwrap();

    let chunk = read_loop_chunk(&output).unwrap().unwrap();
    assert_eq!((chunk.loop_start, chunk.loop_stop), (3000, 9500));

    // The appended chunk is covered by the RIFF size
    let file_len = std::fs::metadata(&output).unwrap().len();
    assert_eq!(u64::from(riff_size(&output)), file_len - 8);

    // Audio is still readable past the extra chunk
    let looped = read_wave(&output).unwrap();
    assert_eq!(looped.format.frame_count, 10_500);
    assert_eq!(looped.frames, processed.frames);
}

#[test]
fn test_plain_wave_has_no_loop_chunk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.wav");
    write_test_wav_i16(&path, 1, 8000, 100);

    assert_eq!(read_loop_chunk(&path).unwrap(), None);
}

#[test]
fn test_append_chunk_grows_file_by_chunk_len() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grow.wav");
    write_test_wav_i16(&path, 1, 8000, 100);
    let before = std::fs::metadata(&path).unwrap().len();

    let chunk = smoothloop_core::LoopChunk {
        loop_start: 10,
        loop_stop: 90,
    };
    smoothloop_wav::append_chunk(&path, &chunk.encode()).unwrap();

    let after = std::fs::metadata(&path).unwrap().len();
    assert_eq!(after, before + LOOP_CHUNK_LEN as u64);
    assert_eq!(read_loop_chunk(&path).unwrap(), Some(chunk));
}

#[test]
fn test_append_chunk_rejects_non_wav() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"definitely not a riff file").unwrap();

    assert!(matches!(
        smoothloop_wav::append_chunk(&path, &[0u8; 8]),
        Err(WavError::Malformed(_))
    ));
}
