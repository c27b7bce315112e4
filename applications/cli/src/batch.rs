//! Batch driver
//!
//! Files are handled one after another. Each one is read completely before
//! its output is written, so `--overwrite` can reuse the input path.

use crate::config::{AppConfig, FailurePolicy};
use crate::error::Result;
use crate::naming::output_path;
use anyhow::Context;
use smoothloop_core::{LoopChunk, LoopPipeline};
use smoothloop_wav::{read_wave, write_looped_wave};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// A file turned into a loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub loop_chunk: LoopChunk,
}

/// A file that couldn't be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub input: PathBuf,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: Vec<ProcessedFile>,
    pub failed: Vec<FailedFile>,
    /// Files left untouched after an abort
    pub not_attempted: Vec<PathBuf>,
}

impl BatchReport {
    /// True when every file was processed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.not_attempted.is_empty()
    }

    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len() + self.not_attempted.len()
    }
}

pub struct BatchProcessor {
    pipeline: LoopPipeline,
    filename_suffix: String,
    overwrite: bool,
    on_error: FailurePolicy,
}

impl BatchProcessor {
    /// Create a processor from validated settings
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: LoopPipeline::new(config.loop_options)?,
            filename_suffix: config.filename_suffix.clone(),
            overwrite: config.overwrite,
            on_error: config.on_error,
        })
    }

    /// Process `files` in order
    pub fn run<P: AsRef<Path>>(&self, files: &[P]) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, file) in files.iter().enumerate() {
            let input = file.as_ref();
            match self.process_file(input) {
                Ok(done) => report.processed.push(done),
                Err(err) => {
                    error!("Error when dealing with {}: {:#}", input.display(), err);
                    debug!("Debug information: {:?}", err);
                    report.failed.push(FailedFile {
                        input: input.to_path_buf(),
                        error: format!("{err:#}"),
                    });

                    if self.on_error == FailurePolicy::Abort {
                        report.not_attempted = files[index + 1..]
                            .iter()
                            .map(|f| f.as_ref().to_path_buf())
                            .collect();
                        error!("Exiting...");
                        return report;
                    }
                }
            }
        }

        if report.failed.is_empty() {
            match files.len() {
                0 => {}
                1 => info!("File processed successfully. Exiting..."),
                _ => info!("All files processed successfully. Exiting..."),
            }
        } else {
            error!(
                "{} of {} files failed. Exiting...",
                report.failed.len(),
                report.total()
            );
        }
        report
    }

    /// Read, loop and write one file
    pub fn process_file(&self, input: &Path) -> anyhow::Result<ProcessedFile> {
        info!("Processing {}...", input.display());

        let wave = read_wave(input).context("failed to read the wave")?;
        let processed = self
            .pipeline
            .process(&wave.frames, &wave.format)
            .context("failed to make the loop")?;

        let output = output_path(input, &self.filename_suffix, self.overwrite);
        debug!("Processed. Writing {}...", output.display());
        write_looped_wave(&output, &processed)
            .with_context(|| format!("failed to write {}", output.display()))?;
        debug!("{} written.", output.display());

        Ok(ProcessedFile {
            input: input.to_path_buf(),
            output,
            loop_chunk: processed.loop_chunk,
        })
    }
}
