/// Batch driver tests
/// Runs whole batches against WAV files in a temporary directory
use smoothloop_cli::{AppConfig, BatchProcessor, FailurePolicy};
use smoothloop_core::LoopOptions;
use smoothloop_wav::{read_loop_chunk, read_wave};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ========== Helper Functions ==========

/// Mono 16-bit noise-like test wave at 1 kHz
fn write_wave(path: &Path, frames: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 1000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        writer.write_sample(((i * 7919) % 20000) as i16 - 10000).unwrap();
    }
    writer.finalize().unwrap();
}

fn config() -> AppConfig {
    AppConfig {
        loop_options: LoopOptions {
            cf_source: 0.5,
            cf_length: 1.0,
            cf_cut: 0.2,
            cf_extra: 0.1,
            ..LoopOptions::default()
        },
        ..AppConfig::default()
    }
}

// ========== Tests ==========

/// A single file gets a suffixed, looped copy next to it
#[test]
fn test_single_file_written_with_suffix() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pad.wav");
    write_wave(&input, 4000);

    let processor = BatchProcessor::new(&config()).unwrap();
    let report = processor.run(&[&input]);

    assert!(report.is_success());
    let output = dir.path().join("pad.L.wav");
    assert_eq!(report.processed[0].output, output);

    // Loop covers 1500..3800, 100 extra frames follow
    let chunk = read_loop_chunk(&output).unwrap().unwrap();
    assert_eq!((chunk.loop_start, chunk.loop_stop), (1500, 3800));
    assert_eq!(report.processed[0].loop_chunk, chunk);
    assert_eq!(read_wave(&output).unwrap().format.frame_count, 3900);

    // Source left alone
    assert_eq!(read_wave(&input).unwrap().format.frame_count, 4000);
    assert_eq!(read_loop_chunk(&input).unwrap(), None);
}

/// Overwrite mode replaces the source file
#[test]
fn test_overwrite_replaces_source() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pad.wav");
    write_wave(&input, 4000);

    let config = AppConfig {
        overwrite: true,
        ..config()
    };
    let report = BatchProcessor::new(&config).unwrap().run(&[&input]);

    assert!(report.is_success());
    assert_eq!(report.processed[0].output, input);
    assert!(read_loop_chunk(&input).unwrap().is_some());
    assert!(!dir.path().join("pad.L.wav").exists());
}

/// Abort policy stops at the first failing file
#[test]
fn test_abort_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.wav");
    let short = dir.path().join("short.wav");
    let last = dir.path().join("last.wav");
    write_wave(&good, 4000);
    write_wave(&short, 500);
    write_wave(&last, 4000);

    let processor = BatchProcessor::new(&config()).unwrap();
    let report = processor.run(&[&good, &short, &last]);

    assert!(!report.is_success());
    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.failed[0].input, short);
    assert!(report.failed[0].error.contains("too short"));
    assert_eq!(report.not_attempted, vec![last.clone()]);
    assert!(!dir.path().join("last.L.wav").exists());
}

/// Skip policy goes on after a failure
#[test]
fn test_skip_continues_after_failure() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.wav");
    let good = dir.path().join("good.wav");
    write_wave(&good, 4000);

    let config = AppConfig {
        on_error: FailurePolicy::Skip,
        ..config()
    };
    let files: Vec<PathBuf> = vec![missing.clone(), good.clone()];
    let report = BatchProcessor::new(&config).unwrap().run(&files);

    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].input, missing);
    assert_eq!(report.processed.len(), 1);
    assert!(dir.path().join("good.L.wav").exists());
    assert!(report.not_attempted.is_empty());
}

/// Non-WAV input is reported, not panicked on
#[test]
fn test_rejects_non_wave_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.wav");
    std::fs::write(&input, b"plain text").unwrap();

    let report = BatchProcessor::new(&config()).unwrap().run(&[&input]);

    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].error.contains("failed to read"));
}
