//! smoothloop command-line application
//!
//! Turns WAV samples into seamless loops: reads each file, crossfades its
//! tail into the loop start, writes the result with a `smpl` loop chunk.
//!
//! This library exposes the application components for testing purposes.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod naming;

// Re-export commonly used types for convenience
pub use batch::{BatchProcessor, BatchReport};
pub use config::{AppConfig, FailurePolicy, Verbosity};
pub use error::{CliError, Result};
